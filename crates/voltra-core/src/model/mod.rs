// ── Domain models ──

pub mod device;
pub mod energy;
pub mod room;
pub mod session;
pub mod unit;

pub use device::{Device, DeviceDraft};
pub use energy::EnergySeries;
pub use room::{Room, RoomDraft};
pub use session::Session;
pub use unit::{Address, Unit, UnitDraft};
