//! Screen registry -- one section per sidebar entry of the original.

pub mod devices;
pub mod overview;
pub mod resource;
pub mod rooms;
pub mod units;

use std::sync::Arc;

use voltra_core::Workspace;

use crate::component::Component;

/// The sections the router can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Overview,
    Units,
    Rooms,
    Devices,
}

impl ScreenId {
    pub const ALL: [Self; 4] = [Self::Overview, Self::Units, Self::Rooms, Self::Devices];

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Units => "Units",
            Self::Rooms => "Rooms",
            Self::Devices => "Devices",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Units,
            Self::Units => Self::Rooms,
            Self::Rooms => Self::Devices,
            Self::Devices => Self::Overview,
        }
    }
}

/// Build every screen over the shared workspace.
pub fn create_screens(workspace: &Arc<Workspace>) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Overview,
            Box::new(overview::OverviewScreen::new(workspace)),
        ),
        (ScreenId::Units, Box::new(units::screen(workspace))),
        (ScreenId::Rooms, Box::new(rooms::screen(workspace))),
        (ScreenId::Devices, Box::new(devices::screen(workspace))),
    ]
}
