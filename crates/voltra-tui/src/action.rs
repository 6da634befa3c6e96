//! Actions dispatched through the app's channel.

use voltra_core::{AddressLookup, Notice};

use crate::screens::ScreenId;

#[derive(Debug)]
pub enum Action {
    /// 4 Hz housekeeping tick (notice draining, toast expiry).
    Tick,
    /// Redraw request.
    Render,
    /// Terminal resized.
    Resize(u16, u16),
    /// Leave the event loop.
    Quit,
    /// Activate a section (the section-router transition).
    Switch(ScreenId),
    /// Flip the light/dark theme and persist the preference.
    ToggleTheme,
    /// Show a toast notification.
    Notify(Notice),
    /// A form asked for a postal-code lookup (field blur).
    LookupPostal(String),
    /// The postal-code lookup answered.
    AddressResolved(AddressLookup),
}
