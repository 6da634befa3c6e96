//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use voltra_core::CoreError;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Invalid email or password")]
    #[diagnostic(
        code(voltra::invalid_credentials),
        help("Check the credentials and try again.\nForgot the password? Run: voltra password recover --email <you>")
    )]
    InvalidCredentials,

    #[error("Session expired or not logged in")]
    #[diagnostic(
        code(voltra::auth_expired),
        help("The stored session was cleared. Log in again with: voltra login")
    )]
    AuthExpired,

    #[error("No stored session")]
    #[diagnostic(code(voltra::no_session), help("Log in first with: voltra login"))]
    NoSession,

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the server")]
    #[diagnostic(
        code(voltra::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Override the URL with --server or VOLTRA_SERVER."
        )
    )]
    ConnectionFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("The server rejected the request (HTTP {status}): {message}")]
    #[diagnostic(code(voltra::request_failed))]
    RequestFailed { status: u16, message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(voltra::not_found),
        help("Run: voltra {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(voltra::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(voltra::config),
        help("Inspect the effective configuration with: voltra config show")
    )]
    Config { message: String },

    // ── Plumbing ─────────────────────────────────────────────────────

    #[error("IO error: {0}")]
    #[diagnostic(code(voltra::io))]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(voltra::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidCredentials | Self::AuthExpired | Self::NoSession => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }

    /// Whether the stored session should be destroyed (the forced-login
    /// redirect of the original client).
    pub fn clears_session(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::AuthExpired => Self::AuthExpired,
            CoreError::RequestFailed { status, message } => Self::RequestFailed { status, message },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<voltra_config::ConfigError> for CliError {
    fn from(err: voltra_config::ConfigError) -> Self {
        match err {
            voltra_config::ConfigError::NoSession => Self::NoSession,
            voltra_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
