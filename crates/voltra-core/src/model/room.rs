// ── Room (environment) domain types ──

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::CoreError;
use crate::module::Resource;

/// A room (environment) inside a unit. The parent unit is shown
/// denormalized -- the list endpoint carries the unit's name alongside its
/// id so the table needs no extra lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub unit_id: Option<u64>,
    pub unit_name: Option<String>,
}

/// Unsaved form values for creating or updating a room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    pub description: Option<String>,
    pub unit_id: Option<u64>,
}

impl Resource for Room {
    type Wire = voltra_api::types::AmbienteRecord;
    type Draft = RoomDraft;

    const COLLECTION: &'static str = "ambientes";
    const SINGULAR: &'static str = "room";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_wire(wire: Self::Wire) -> Self {
        wire.into()
    }

    fn draft_to_wire(draft: &Self::Draft, id: Option<u64>) -> Self::Wire {
        convert::room_wire(draft, id)
    }

    // No client-side required-field policy; parent-reference integrity is
    // the server's call and surfaces as a request failure.
    fn validate(_draft: &Self::Draft) -> Result<(), CoreError> {
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Description", "Unit"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_else(|| "-".into()),
            self.unit_name.clone().unwrap_or_else(|| "-".into()),
        ]
    }
}
