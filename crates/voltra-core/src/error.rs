// ── Core error types ──
//
// User-facing errors from voltra-core. Consumers never see HTTP plumbing
// directly -- the `From<voltra_api::Error>` impl is the single translation
// point from the transport layer into this taxonomy.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Client-side validation failure. Resolved locally, never reaches the
    /// network layer.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The stored session is missing or no longer accepted. Not retryable;
    /// the only way out is the login flow.
    #[error("session expired -- log in again")]
    AuthExpired,

    /// The server answered with a non-success status. The message is the
    /// server's own, extracted from the response body.
    #[error("request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// No response reached the client (refused, unreachable, or timed out).
    #[error("connection failed: {reason}")]
    ConnectionFailed { reason: String },

    /// Configuration problem (bad URL, unreadable file).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A success response the client could not make sense of.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Convenience constructor for validation failures.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` when the user must re-authenticate.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<voltra_api::Error> for CoreError {
    fn from(err: voltra_api::Error) -> Self {
        match err {
            voltra_api::Error::Authentication { message } => Self::RequestFailed {
                status: 401,
                message,
            },
            voltra_api::Error::SessionExpired => Self::AuthExpired,
            voltra_api::Error::Transport(e) => {
                if e.is_connect() || e.is_timeout() || e.is_request() {
                    Self::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    Self::RequestFailed {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            voltra_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            voltra_api::Error::Api { status, message } => Self::RequestFailed { status, message },
            voltra_api::Error::Deserialization { message, .. } => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_maps_to_auth_expired() {
        let core: CoreError = voltra_api::Error::SessionExpired.into();
        assert!(core.is_auth_expired());
    }

    #[test]
    fn api_error_keeps_status_and_message() {
        let core: CoreError = voltra_api::Error::Api {
            status: 409,
            message: "unidade possui ambientes".into(),
        }
        .into();
        match core {
            CoreError::RequestFailed { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "unidade possui ambientes");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
