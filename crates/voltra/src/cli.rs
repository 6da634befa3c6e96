//! Clap derive structures for the `voltra` CLI.
//!
//! Defines the complete command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// voltra -- manage units, rooms, and devices from the command line
#[derive(Debug, Parser)]
#[command(
    name = "voltra",
    version,
    about = "Manage the Voltra energy platform from the command line",
    long_about = "A CLI for the Voltra facilities/energy-management backend.\n\n\
        Log in once with `voltra login`, then list, add, edit, and delete\n\
        units, rooms, and devices, look up addresses by postal code, and\n\
        check the weekly consumption overview.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, short = 's', env = "VOLTRA_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VOLTRA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "VOLTRA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain ids, one per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if the terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login(LoginArgs),

    /// Clear the stored session
    Logout,

    /// Show who is currently logged in
    Whoami,

    /// Password recovery and reset
    Password(PasswordArgs),

    /// Manage units
    #[command(alias = "u")]
    Units(UnitsArgs),

    /// Manage rooms (environments)
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Manage devices
    #[command(alias = "d", alias = "dev")]
    Devices(DevicesArgs),

    /// Look up an address by postal code
    Address(AddressArgs),

    /// Counts and the weekly consumption series
    Overview,

    /// Inspect and edit the configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account password (prompted when omitted; prefer the prompt)
    #[arg(long, hide = true)]
    pub password: Option<String>,

    /// Log in even when a session is already stored
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct PasswordArgs {
    #[command(subcommand)]
    pub command: PasswordCommand,
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Email a password-reset link
    Recover {
        /// Account email
        #[arg(long, short = 'e')]
        email: String,
    },
    /// Redeem a reset token for a new password
    Reset {
        /// Token from the reset email
        #[arg(long, short = 't')]
        token: String,
        /// New password (prompted when omitted)
        #[arg(long, hide = true)]
        password: Option<String>,
    },
}

// ── Units ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UnitsArgs {
    #[command(subcommand)]
    pub command: UnitsCommand,
}

#[derive(Debug, Subcommand)]
pub enum UnitsCommand {
    /// List all units
    #[command(alias = "ls")]
    List,
    /// Create a unit
    Add {
        #[arg(long)]
        name: String,
        /// Access code
        #[arg(long)]
        code: String,
        /// Postal code (8 digits)
        #[arg(long)]
        cep: String,
        /// Street number
        #[arg(long)]
        number: String,
        /// Skip the address lookup echo
        #[arg(long)]
        no_lookup: bool,
    },
    /// Edit a unit (unset flags keep their current value)
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        cep: Option<String>,
        #[arg(long)]
        number: Option<String>,
    },
    /// Delete a unit
    #[command(alias = "rm")]
    Delete { id: u64 },
}

// ── Rooms ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List all rooms
    #[command(alias = "ls")]
    List,
    /// Create a room
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Parent unit id
        #[arg(long)]
        unit: Option<u64>,
    },
    /// Edit a room (unset flags keep their current value)
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Parent unit id
        #[arg(long)]
        unit: Option<u64>,
    },
    /// Delete a room
    #[command(alias = "rm")]
    Delete { id: u64 },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DeviceStatus {
    Active,
    Inactive,
}

impl DeviceStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List all devices
    #[command(alias = "ls")]
    List,
    /// Create a device
    Add {
        #[arg(long)]
        name: String,
        /// Device category (e.g. "climatizacao", "iluminacao")
        #[arg(long = "type")]
        kind: String,
        /// Rated power in watts
        #[arg(long)]
        power: f64,
        #[arg(long, value_enum, default_value = "active")]
        status: DeviceStatus,
        /// Parent room id
        #[arg(long)]
        room: Option<u64>,
    },
    /// Edit a device (unset flags keep their current value)
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        power: Option<f64>,
        #[arg(long, value_enum)]
        status: Option<DeviceStatus>,
        /// Parent room id
        #[arg(long)]
        room: Option<u64>,
    },
    /// Delete a device
    #[command(alias = "rm")]
    Delete { id: u64 },
}

// ── Misc ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressArgs {
    /// Postal code, punctuation allowed ("01310-100")
    pub postal_code: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Persist the dashboard theme preference
    SetTheme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
