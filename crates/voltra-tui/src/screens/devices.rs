//! Devices section.

use std::sync::Arc;

use voltra_core::{Device, DeviceDraft, Workspace, device_stats};

use super::resource::{FieldDef, FieldKind, Parent, ResourceScreen, ScreenSpec};

const FIELDS: &[FieldDef] = &[
    FieldDef {
        label: "Name",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Type",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Power (W)",
        kind: FieldKind::Number,
    },
    FieldDef {
        label: "Status",
        kind: FieldKind::Toggle,
    },
    FieldDef {
        label: "Room id",
        kind: FieldKind::Number,
    },
];

fn to_values(device: &Device) -> Vec<String> {
    vec![
        device.name.clone(),
        device.kind.clone(),
        device.power_watts.to_string(),
        if device.active { "active" } else { "inactive" }.to_string(),
        device.room_id.map(|id| id.to_string()).unwrap_or_default(),
    ]
}

fn to_draft(values: &[String]) -> Result<DeviceDraft, String> {
    let power = values[2].trim();
    let power_watts = if power.is_empty() {
        0.0
    } else {
        power
            .parse::<f64>()
            .map_err(|_| "power must be a number of watts".to_string())?
    };
    let room = values[4].trim();
    let room_id = if room.is_empty() {
        None
    } else {
        Some(
            room.parse::<u64>()
                .map_err(|_| "room id must be a number".to_string())?,
        )
    };
    Ok(DeviceDraft {
        name: values[0].trim().to_string(),
        kind: values[1].trim().to_string(),
        power_watts,
        active: values[3] == "active",
        room_id,
    })
}

fn stats_line(items: &[Device]) -> String {
    let stats = device_stats(items);
    format!(
        "{} devices · {} active · {} inactive",
        stats.total, stats.active, stats.inactive
    )
}

pub fn screen(workspace: &Arc<Workspace>) -> ResourceScreen<Device> {
    let spec = ScreenSpec {
        id: "devices",
        singular: "Device",
        fields: FIELDS,
        to_values,
        to_draft,
        postal_field: None,
        parent: Parent::Rooms,
        stats_line,
    };
    ResourceScreen::new(spec, workspace.devices.clone(), workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(power: &str, status: &str, room: &str) -> Vec<String> {
        vec![
            "Ar-condicionado".into(),
            "climatizacao".into(),
            power.into(),
            status.into(),
            room.into(),
        ]
    }

    #[test]
    fn draft_parses_power_status_and_parent() {
        let draft = to_draft(&values("1400", "active", "3")).unwrap();
        assert_eq!(draft.power_watts, 1400.0);
        assert!(draft.active);
        assert_eq!(draft.room_id, Some(3));
    }

    #[test]
    fn unparseable_numbers_become_inline_messages() {
        assert!(to_draft(&values("lots", "active", "")).is_err());
        assert!(to_draft(&values("60", "active", "sala")).is_err());
    }

    #[test]
    fn form_values_round_trip() {
        let device = Device {
            id: 7,
            name: "Ar-condicionado".into(),
            kind: "climatizacao".into(),
            power_watts: 1400.0,
            active: false,
            room_id: Some(3),
            room_name: Some("Sala 101".into()),
        };
        let draft = to_draft(&to_values(&device)).unwrap();
        assert_eq!(draft.name, device.name);
        assert!(!draft.active);
        assert_eq!(draft.room_id, device.room_id);
    }
}
