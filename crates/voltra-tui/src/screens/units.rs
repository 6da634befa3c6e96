//! Units section.

use std::sync::Arc;

use voltra_core::{Unit, UnitDraft, Workspace, list_stats};

use super::resource::{FieldDef, FieldKind, Parent, ResourceScreen, ScreenSpec};

const FIELDS: &[FieldDef] = &[
    FieldDef {
        label: "Name",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Access code",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Postal code",
        kind: FieldKind::Text,
    },
    FieldDef {
        label: "Number",
        kind: FieldKind::Text,
    },
];

fn to_values(unit: &Unit) -> Vec<String> {
    vec![
        unit.name.clone(),
        unit.access_code.clone(),
        unit.address.postal_code.clone(),
        unit.address.number.clone(),
    ]
}

#[allow(clippy::unnecessary_wraps)]
fn to_draft(values: &[String]) -> Result<UnitDraft, String> {
    Ok(UnitDraft {
        name: values[0].trim().to_string(),
        access_code: values[1].trim().to_string(),
        postal_code: values[2].trim().to_string(),
        number: values[3].trim().to_string(),
    })
}

fn stats_line(items: &[Unit]) -> String {
    format!("{} units", list_stats(items).total)
}

pub fn screen(workspace: &Arc<Workspace>) -> ResourceScreen<Unit> {
    let spec = ScreenSpec {
        id: "units",
        singular: "Unit",
        fields: FIELDS,
        to_values,
        to_draft,
        postal_field: Some(2),
        parent: Parent::None,
        stats_line,
    };
    ResourceScreen::new(spec, workspace.units.clone(), workspace)
}
