//! Shared configuration for the Voltra CLI and TUI.
//!
//! TOML config (figment: defaults → file → environment), the persisted
//! session (the browser-local-storage analog), the theme preference, and
//! credential resolution (env var → OS keyring → session file). Both
//! binaries depend on this crate.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use voltra_core::{Session, TransportConfig};

const KEYRING_SERVICE: &str = "voltra";
const KEYRING_TOKEN_ENTRY: &str = "session/token";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no stored session -- run `voltra login` first")]
    NoSession,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("malformed session file: {0}")]
    SessionFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Theme preference ────────────────────────────────────────────────

/// Light/dark preference, persisted under its own config key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard theme.
    #[serde(default)]
    pub theme: Theme,

    /// Default CLI output format ("table", "json", ...).
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout: default_timeout(),
            theme: Theme::default(),
            output: default_output(),
        }
    }
}

fn default_server() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_output() -> String {
    "table".into()
}

impl Config {
    /// The parsed backend base URL.
    pub fn server_url(&self) -> Result<url::Url, ConfigError> {
        self.server.parse().map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", self.server),
        })
    }

    /// Transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "voltra", "voltra")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("voltra");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the session file path (data dir, not config dir).
pub fn session_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("session.json"),
        |dirs| dirs.data_local_dir().join("session.json"),
    )
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("VOLTRA_"));
    Ok(figment.extract()?)
}

/// Load config, falling back to defaults when the file is absent or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Session persistence ─────────────────────────────────────────────

/// Read the stored session, if any. A malformed file reads as "no
/// session" after being cleared -- the login flow starts from scratch,
/// exactly as the original client handled a corrupt storage entry.
pub fn load_session() -> Option<Session> {
    load_session_at(&session_path())
}

pub fn load_session_at(path: &std::path::Path) -> Option<Session> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Session>(&raw) {
        Ok(session) if !session.token.is_empty() => Some(session),
        _ => {
            let _ = std::fs::remove_file(path);
            None
        }
    }
}

/// Persist a session. Also tries to move the token into the OS keyring;
/// the file keeps a copy either way so headless hosts still work.
pub fn save_session(session: &Session) -> Result<(), ConfigError> {
    save_session_at(session, &session_path())?;
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_ENTRY) {
        let _ = entry.set_password(&session.token);
    }
    Ok(())
}

pub fn save_session_at(session: &Session, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}

/// Destroy the stored session everywhere (logout, or a 401 from the server).
pub fn clear_session() {
    let _ = std::fs::remove_file(session_path());
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_ENTRY) {
        let _ = entry.delete_credential();
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the bearer token from the credential chain:
/// `VOLTRA_TOKEN` env var → OS keyring → session file.
pub fn resolve_token() -> Result<SecretString, ConfigError> {
    // 1. Environment (scripting / CI)
    if let Ok(token) = std::env::var("VOLTRA_TOKEN") {
        if !token.is_empty() {
            return Ok(SecretString::from(token));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_ENTRY) {
        if let Ok(token) = entry.get_password() {
            return Ok(SecretString::from(token));
        }
    }

    // 3. Session file
    if let Some(session) = load_session() {
        return Ok(session.credential());
    }

    Err(ConfigError::NoSession)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session() -> Session {
        Session {
            token: "tok123".into(),
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn config_defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.server, "http://localhost:8080");
        assert_eq!(cfg.transport().timeout, Duration::from_secs(10));
        assert!(cfg.server_url().is_ok());
    }

    #[test]
    fn bad_server_url_is_a_validation_error() {
        let cfg = Config {
            server: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.server_url(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn theme_round_trips_and_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        let toml_str = toml::to_string(&Config {
            theme: Theme::Dark,
            ..Config::default()
        })
        .unwrap();
        assert!(toml_str.contains("theme = \"dark\""));
    }

    #[test]
    fn session_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save_session_at(&session(), &path).unwrap();
        let loaded = load_session_at(&path).expect("session should load");
        assert_eq!(loaded.token, "tok123");
        assert_eq!(loaded.display_name(), "Ana Souza");
    }

    #[test]
    fn malformed_session_file_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_session_at(&path).is_none());
        assert!(!path.exists(), "corrupt session file should be removed");
    }

    #[test]
    fn empty_token_counts_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut s = session();
        s.token = String::new();
        save_session_at(&s, &path).unwrap();

        assert!(load_session_at(&path).is_none());
    }
}
