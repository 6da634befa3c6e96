//! Rooms section.

use std::sync::Arc;

use voltra_core::{Room, RoomDraft, Workspace, list_stats};

use super::resource::{FieldDef, FieldKind, Parent, ResourceScreen, ScreenSpec};

const FIELDS: &[FieldDef] = &[
    FieldDef {
        label: "Name",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Description",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Unit id",
        kind: FieldKind::Number,
    },
];

fn to_values(room: &Room) -> Vec<String> {
    vec![
        room.name.clone(),
        room.description.clone().unwrap_or_default(),
        room.unit_id.map(|id| id.to_string()).unwrap_or_default(),
    ]
}

fn to_draft(values: &[String]) -> Result<RoomDraft, String> {
    let description = values[1].trim();
    let unit = values[2].trim();
    let unit_id = if unit.is_empty() {
        None
    } else {
        Some(
            unit.parse::<u64>()
                .map_err(|_| "unit id must be a number".to_string())?,
        )
    };
    Ok(RoomDraft {
        name: values[0].trim().to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        unit_id,
    })
}

fn stats_line(items: &[Room]) -> String {
    format!("{} rooms", list_stats(items).total)
}

pub fn screen(workspace: &Arc<Workspace>) -> ResourceScreen<Room> {
    let spec = ScreenSpec {
        id: "rooms",
        singular: "Room",
        fields: FIELDS,
        to_values,
        to_draft,
        postal_field: None,
        parent: Parent::Units,
        stats_line,
    };
    ResourceScreen::new(spec, workspace.rooms.clone(), workspace)
}
