// Shared transport configuration for building reqwest::Client instances.
//
// The backend is a plain-HTTP LAN service; the knob that matters is the
// per-request timeout, which callers map to a connection failure on expiry.

use std::time::Duration;

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("voltra/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}
