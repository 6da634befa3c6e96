//! Command dispatch: bridges CLI args -> workspace operations -> output.

pub mod address;
pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod overview;
pub mod password;
pub mod rooms;
pub mod units;
pub mod util;

use voltra_core::Workspace;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    workspace: &Workspace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Units(args) => units::handle(workspace, args, global).await,
        Command::Rooms(args) => rooms::handle(workspace, args, global).await,
        Command::Devices(args) => devices::handle(workspace, args, global).await,
        Command::Address(args) => address::handle(workspace, &args, global).await,
        Command::Overview => overview::handle(workspace, global).await,
        // Auth, config, and completions are handled before dispatch
        Command::Login(_)
        | Command::Logout
        | Command::Whoami
        | Command::Password(_)
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
