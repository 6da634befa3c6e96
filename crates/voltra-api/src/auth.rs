// Authentication and password-flow endpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    senha: &'a str,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub nome: String,
    pub sobrenome: String,
    #[serde(default)]
    pub foto: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetRequest<'a> {
    token: &'a str,
    #[serde(rename = "novaSenha")]
    nova_senha: &'a str,
}

impl ApiClient {
    /// `POST /api/auth/login`.
    ///
    /// A 401 here is an invalid-credentials outcome, not an expired
    /// session -- nothing was stored yet.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse, Error> {
        match self
            .post_json::<LoginResponse, _>("auth/login", &LoginRequest { email, senha })
            .await
        {
            Ok(resp) => {
                debug!("login accepted");
                Ok(resp)
            }
            Err(Error::SessionExpired) => Err(Error::Authentication {
                message: "invalid email or password".into(),
            }),
            Err(e) => Err(e),
        }
    }

    /// `POST /api/usuarios/senha/recuperar` -- request a reset link by
    /// email. Returns the server's message verbatim.
    pub async fn recover_password(&self, email: &str) -> Result<String, Error> {
        self.post_for_message("usuarios/senha/recuperar", &RecoverRequest { email })
            .await
    }

    /// `POST /api/usuarios/senha/resetar` -- redeem the emailed token for a
    /// new password. Returns the server's message verbatim.
    pub async fn reset_password(&self, token: &str, nova_senha: &str) -> Result<String, Error> {
        self.post_for_message("usuarios/senha/resetar", &ResetRequest { token, nova_senha })
            .await
    }
}
