// Voltra API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-credential
// attachment, and error-body extraction. Endpoint groups (auth, address)
// are implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Voltra backend.
///
/// Handles `/api/{path}` URL construction, the `Authorization: Bearer ...`
/// header, and non-2xx error extraction. Collection endpoints are generic
/// over the path segment: `"unidades"`, `"ambientes"`, `"dispositivos"`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

/// Normalize a stored token into a `Bearer` header value.
///
/// Sessions written by older front ends may already carry the prefix; the
/// outgoing header must be exactly `"Bearer " + raw` either way.
pub fn bearer_value(raw: &str) -> String {
    let raw = raw.trim();
    let stripped = raw.strip_prefix("Bearer ").unwrap_or(raw);
    format!("Bearer {stripped}")
}

impl ApiClient {
    /// Create an unauthenticated client (login / password flows).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach the session credential. All subsequent requests carry it.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                bearer_value(token.expose_secret()),
            );
        }
        builder
    }

    /// Send a GET request and deserialize the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        Self::parse_json(Self::check(resp).await?).await
    }

    /// Send a POST request with a JSON body and deserialize the response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);
        let resp = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;
        Self::parse_json(Self::check(resp).await?).await
    }

    /// Send a PUT request with a JSON body and deserialize the response.
    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);
        let resp = self
            .request(reqwest::Method::PUT, url)
            .json(body)
            .send()
            .await?;
        Self::parse_json(Self::check(resp).await?).await
    }

    /// Send a DELETE request. Success responses carry no body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);
        let resp = self.request(reqwest::Method::DELETE, url).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Send a POST and return the response body as a plain message string
    /// (the password endpoints answer with either `{"message": ...}` or
    /// raw text).
    pub(crate) async fn post_for_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);
        let resp = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let text = resp.text().await?;
        Ok(extract_message(&text))
    }

    // ── Collection CRUD ──────────────────────────────────────────────

    /// `GET /api/{collection}` -- the full server-ordered record list.
    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, Error> {
        self.get_json(collection).await
    }

    /// `POST /api/{collection}` -- create a record, returning the stored copy.
    pub async fn create<T: DeserializeOwned + Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<T, Error> {
        self.post_json(collection, record).await
    }

    /// `PUT /api/{collection}` -- update a record in place (id in the body),
    /// returning the stored copy.
    pub async fn update<T: DeserializeOwned + Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<T, Error> {
        self.put_json(collection, record).await
    }

    /// `DELETE /api/{collection}/{id}`.
    pub async fn remove(&self, collection: &str, id: u64) -> Result<(), Error> {
        self.delete(&format!("{collection}/{id}")).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Map a non-success status into an error, extracting the server's
    /// message from the body. 401 means the credential is no longer valid.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: extract_message(&body),
        })
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull a human-readable message out of a response body: structured JSON
/// `{"message": ...}` first, raw text as the fallback.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_value_adds_prefix() {
        assert_eq!(bearer_value("abc123"), "Bearer abc123");
    }

    #[test]
    fn bearer_value_never_double_prefixes() {
        assert_eq!(bearer_value("Bearer abc123"), "Bearer abc123");
        assert_eq!(bearer_value("  Bearer abc123  "), "Bearer abc123");
    }

    #[test]
    fn extract_message_prefers_structured_body() {
        assert_eq!(
            extract_message(r#"{"message": "unidade em uso", "status": 409}"#),
            "unidade em uso"
        );
    }

    #[test]
    fn extract_message_falls_back_to_raw_text() {
        assert_eq!(extract_message("erro interno\n"), "erro interno");
        // JSON without a message field is surfaced verbatim
        assert_eq!(extract_message(r#"{"error": "x"}"#), r#"{"error": "x"}"#);
    }
}
