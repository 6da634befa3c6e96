// Postal-code address lookup (`GET /api/endereco/{cep}`).

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;

/// Address returned by the postal-code service. Every field is optional --
/// the user can still fill the form by hand when the service is patchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressLookup {
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl ApiClient {
    /// Look up an address by its 8-digit postal code. The caller is
    /// responsible for stripping punctuation and validating the length.
    pub async fn lookup_address(&self, cep: &str) -> Result<AddressLookup, Error> {
        self.get_json(&format!("endereco/{cep}")).await
    }
}
