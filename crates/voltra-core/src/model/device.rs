// ── Device domain types ──

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::CoreError;
use crate::module::Resource;

/// A powered device inside a room. The parent room is shown denormalized,
/// same as [`Room`](super::Room) and its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    pub name: String,
    /// Free-form device category ("climatizacao", "iluminacao", ...).
    pub kind: String,
    pub power_watts: f64,
    pub active: bool,
    pub room_id: Option<u64>,
    pub room_name: Option<String>,
}

impl Device {
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }
}

/// Unsaved form values for creating or updating a device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceDraft {
    pub name: String,
    pub kind: String,
    pub power_watts: f64,
    pub active: bool,
    pub room_id: Option<u64>,
}

impl Resource for Device {
    type Wire = voltra_api::types::DispositivoRecord;
    type Draft = DeviceDraft;

    const COLLECTION: &'static str = "dispositivos";
    const SINGULAR: &'static str = "device";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_wire(wire: Self::Wire) -> Self {
        wire.into()
    }

    fn draft_to_wire(draft: &Self::Draft, id: Option<u64>) -> Self::Wire {
        convert::device_wire(draft, id)
    }

    // Browser form semantics only -- nothing beyond what the inputs enforce.
    fn validate(_draft: &Self::Draft) -> Result<(), CoreError> {
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Type", "Power", "Room", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.clone(),
            format!("{} W", self.power_watts),
            self.room_name.clone().unwrap_or_else(|| "-".into()),
            self.status_label().to_string(),
        ]
    }
}
