mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voltra_core::{ApiClient, Workspace};

use crate::app::App;

/// Terminal dashboard for the Voltra energy-management platform.
#[derive(Debug, Parser)]
#[command(name = "voltra-tui", version, about)]
struct Args {
    /// Backend base URL (overrides config)
    #[arg(long, short = 's', env = "VOLTRA_SERVER")]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    tui::install_hooks()?;
    init_tracing();

    let mut cfg = voltra_config::load_config_or_default();
    if let Some(server) = args.server {
        cfg.server = server;
    }

    // No session means no dashboard -- the login flow is the only way in.
    let Some(session) = voltra_config::load_session() else {
        eprintln!("No stored session -- run `voltra login` first.");
        std::process::exit(3);
    };
    let token = voltra_config::resolve_token().unwrap_or_else(|_| session.credential());

    let client = ApiClient::new(cfg.server_url()?, &cfg.transport())?.with_token(token);
    let workspace = Arc::new(Workspace::new(client));

    let mut app = App::new(&workspace, session, cfg.theme);
    app.run().await?;

    if app.session_expired() {
        eprintln!("Session expired -- run `voltra login` and start again.");
        std::process::exit(3);
    }
    Ok(())
}

/// The terminal owns stdout, so tracing goes to a file -- and only when
/// asked for via `VOLTRA_TUI_LOG`.
fn init_tracing() {
    let Ok(path) = std::env::var("VOLTRA_TUI_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
