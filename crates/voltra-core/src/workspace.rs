// ── Workspace façade ──
//
// Owns the three resource modules over one shared API client and
// orchestrates the cross-module behaviors: parent-selector preloading when
// a child editor opens, the overview summary, and the postal-code lookup.

use std::sync::Arc;

use voltra_api::ApiClient;
use voltra_api::address::AddressLookup;

use crate::error::CoreError;
use crate::model::{Device, EnergySeries, Room, Unit};
use crate::module::ResourceModule;
use crate::render::{DeviceStats, device_stats};

/// Counts shown on the overview screen's stat tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct OverviewStats {
    pub units: usize,
    pub rooms: usize,
    pub devices: DeviceStats,
}

pub struct Workspace {
    client: Arc<ApiClient>,
    pub units: ResourceModule<Unit>,
    pub rooms: ResourceModule<Room>,
    pub devices: ResourceModule<Device>,
}

impl Workspace {
    pub fn new(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            units: ResourceModule::new(Arc::clone(&client)),
            rooms: ResourceModule::new(Arc::clone(&client)),
            devices: ResourceModule::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Some module saw the credential rejected -- the session is dead and
    /// the only recovery is the login flow.
    pub fn session_expired(&self) -> bool {
        self.units.auth_expired() || self.rooms.auth_expired() || self.devices.auth_expired()
    }

    /// Load all three lists, units first (parents before children).
    pub async fn load_all(&self) -> Result<(), CoreError> {
        self.units.load().await?;
        self.rooms.load().await?;
        self.devices.load().await?;
        Ok(())
    }

    // ── Child editors preload their parent selector ──────────────────

    /// Open the room editor for a new record; the unit selector is
    /// refreshed so it is never stale.
    pub async fn open_room_editor(&self) {
        self.rooms.open_create();
        let _ = self.units.load().await;
    }

    /// Open the room editor for an existing record (no-op when the id is
    /// not cached), refreshing the unit selector on success.
    pub async fn edit_room(&self, id: u64) -> Option<Room> {
        let room = self.rooms.open_edit(id)?;
        let _ = self.units.load().await;
        Some(room)
    }

    /// Open the device editor for a new record; the room selector is
    /// refreshed so it is never stale.
    pub async fn open_device_editor(&self) {
        self.devices.open_create();
        let _ = self.rooms.load().await;
    }

    /// Open the device editor for an existing record (no-op when the id is
    /// not cached), refreshing the room selector on success.
    pub async fn edit_device(&self, id: u64) -> Option<Device> {
        let device = self.devices.open_edit(id)?;
        let _ = self.rooms.load().await;
        Some(device)
    }

    // ── Overview ─────────────────────────────────────────────────────

    pub fn overview(&self) -> OverviewStats {
        OverviewStats {
            units: self.units.items().len(),
            rooms: self.rooms.items().len(),
            devices: device_stats(&self.devices.items()),
        }
    }

    /// The weekly consumption series for the dashboard chart.
    pub fn energy_series(&self) -> EnergySeries {
        EnergySeries::sample_week()
    }

    // ── Postal-code lookup ───────────────────────────────────────────

    /// Strip punctuation and look the postal code up. Fewer than 8 digits
    /// is a local validation error -- no request is made.
    pub async fn lookup_postal_code(&self, raw: &str) -> Result<AddressLookup, CoreError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 8 {
            return Err(CoreError::validation(
                "postal code",
                "must have 8 digits",
            ));
        }
        Ok(self.client.lookup_address(&digits).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltra_api::TransportConfig;

    fn offline_workspace() -> Workspace {
        let client = ApiClient::new(
            "http://127.0.0.1:9".parse().expect("static url"),
            &TransportConfig::default(),
        )
        .expect("client");
        Workspace::new(client)
    }

    #[tokio::test]
    async fn short_postal_code_fails_before_any_request() {
        let ws = offline_workspace();
        // The dead port would error if a request were attempted.
        let err = ws.lookup_postal_code("123-45").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn overview_starts_at_zero() {
        let ws = offline_workspace();
        assert_eq!(ws.overview(), OverviewStats::default());
    }
}
