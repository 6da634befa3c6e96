// ── Table rendering and summary statistics ──
//
// Pure functions: same items in, same rows out. Renderers (CLI table, TUI
// table) consume these and fully replace whatever they showed before --
// lists are small and freshness matters more than render cost.

use crate::model::Device;
use crate::module::Resource;

/// Map a list of records to table rows via the resource's row template.
pub fn render_rows<R: Resource>(items: &[R]) -> Vec<Vec<String>> {
    items.iter().map(Resource::row).collect()
}

/// Trivial count summary for units and rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ListStats {
    pub total: usize,
}

pub fn list_stats<R: Resource>(items: &[R]) -> ListStats {
    ListStats {
        total: items.len(),
    }
}

/// Device summary with the active/inactive breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeviceStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

pub fn device_stats(items: &[Device]) -> DeviceStats {
    let total = items.len();
    let active = items.iter().filter(|d| d.active).count();
    DeviceStats {
        total,
        active,
        inactive: total - active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;

    fn device(id: u64, active: bool) -> Device {
        Device {
            id,
            name: format!("dev-{id}"),
            kind: "iluminacao".into(),
            power_watts: 60.0,
            active,
            room_id: Some(1),
            room_name: Some("Sala 101".into()),
        }
    }

    #[test]
    fn rendering_is_pure_and_idempotent() {
        let items = vec![device(1, true), device(2, false)];
        let first = render_rows(&items);
        let second = render_rows(&items);
        assert_eq!(first, second);
        assert_eq!(first[0][4], "Active");
        assert_eq!(first[1][4], "Inactive");
    }

    #[test]
    fn device_stats_partition_the_whole_list() {
        let items = vec![device(1, true), device(2, false), device(3, true)];
        let stats = device_stats(&items);
        assert_eq!(stats.total, items.len());
        assert_eq!(stats.active + stats.inactive, stats.total);
        assert_eq!(stats.active, 2);
    }

    #[test]
    fn device_stats_on_the_empty_list_are_all_zero() {
        let stats = device_stats(&[]);
        assert_eq!(stats, DeviceStats::default());
    }

    #[test]
    fn unit_row_shows_name_code_and_postal_code() {
        let unit = Unit {
            id: 1,
            name: "Bloco A".into(),
            access_code: "123".into(),
            address: crate::model::Address {
                postal_code: "12345678".into(),
                number: "10".into(),
                ..Default::default()
            },
        };
        let rows = render_rows(std::slice::from_ref(&unit));
        assert_eq!(rows, vec![vec![
            "Bloco A".to_string(),
            "123".to_string(),
            "12345678".to_string(),
        ]]);
    }

    #[test]
    fn missing_optionals_render_as_dashes() {
        let mut unit = Unit {
            id: 1,
            name: "Bloco A".into(),
            access_code: "123".into(),
            address: crate::model::Address::default(),
        };
        unit.address.postal_code.clear();
        assert_eq!(unit.row()[2], "-");
    }
}
