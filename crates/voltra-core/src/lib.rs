//! voltra-core: domain layer for the Voltra client.
//!
//! Owns the generic resource-module lifecycle (load / edit / save / delete
//! with modal state and queued notices), the typed domain models, and the
//! pure table renderer. Consumers (CLI, TUI) never see wire types or HTTP
//! status codes -- `voltra-api` errors are translated at this boundary.

pub mod convert;
pub mod error;
pub mod modal;
pub mod model;
pub mod module;
pub mod notify;
pub mod render;
pub mod validate;
pub mod workspace;

pub use voltra_api::address::AddressLookup;
pub use voltra_api::{ApiClient, TransportConfig};

pub use error::CoreError;
pub use modal::ModalState;
pub use model::{
    Address, Device, DeviceDraft, EnergySeries, Room, RoomDraft, Session, Unit, UnitDraft,
};
pub use module::{DeleteOutcome, Resource, ResourceModule, SaveOutcome};
pub use notify::{Notice, NoticeLevel, NoticeQueue};
pub use render::{DeviceStats, ListStats, device_stats, list_stats, render_rows};
pub use validate::{PasswordStrength, password_strength, validate_email, validate_new_password};
pub use workspace::{OverviewStats, Workspace};
