//! Shared helpers for command handlers.

use voltra_config::Config;
use voltra_core::{ApiClient, CoreError, Workspace};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file + environment, with CLI flag overrides applied on top.
pub fn effective_config(global: &GlobalOpts) -> Config {
    let mut cfg = voltra_config::load_config_or_default();
    if let Some(server) = &global.server {
        cfg.server = server.clone();
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    cfg
}

/// An API client without a credential (login / password flows).
pub fn anonymous_client(cfg: &Config) -> Result<ApiClient, CliError> {
    ApiClient::new(cfg.server_url()?, &cfg.transport())
        .map_err(|e| CliError::from(CoreError::from(e)))
}

/// Resolve the credential chain and assemble the workspace. Failing to
/// find a credential aborts before any request -- the login-redirect
/// analog for a CLI.
pub fn build_workspace(global: &GlobalOpts) -> Result<Workspace, CliError> {
    let cfg = effective_config(global);
    let token = voltra_config::resolve_token()?;
    let client = anonymous_client(&cfg)?.with_token(token);
    Ok(Workspace::new(client))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Not-found error for an id the server never told us about.
pub fn not_found(resource_type: &str, id: u64, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: id.to_string(),
        list_command: list_command.into(),
    }
}
