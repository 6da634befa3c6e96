//! Light/dark palettes and shared styles.
//!
//! The active theme is process-global, like the original's `dark` class on
//! the document root; toggling restyles everything on the next frame and
//! the preference is persisted by the app.

use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::style::{Color, Modifier, Style};
use voltra_config::Theme;

static DARK: AtomicBool = AtomicBool::new(false);

pub fn set(theme: Theme) {
    DARK.store(matches!(theme, Theme::Dark), Ordering::Relaxed);
}

pub fn current() -> Theme {
    if is_dark() { Theme::Dark } else { Theme::Light }
}

pub fn is_dark() -> bool {
    DARK.load(Ordering::Relaxed)
}

// ── Colors ──────────────────────────────────────────────────────────

pub fn text() -> Color {
    if is_dark() {
        Color::Rgb(229, 231, 235) // gray-200
    } else {
        Color::Rgb(17, 24, 39) // gray-900
    }
}

pub fn dim() -> Color {
    if is_dark() {
        Color::Rgb(156, 163, 175) // gray-400
    } else {
        Color::Rgb(107, 114, 128) // gray-500
    }
}

pub fn border() -> Color {
    if is_dark() {
        Color::Rgb(55, 65, 81) // gray-700
    } else {
        Color::Rgb(209, 213, 219) // gray-300
    }
}

/// The brand green the original chart used (hsl 158 84% 35%).
pub fn accent() -> Color {
    Color::Rgb(14, 164, 108)
}

pub fn accent_dim() -> Color {
    if is_dark() {
        Color::Rgb(6, 60, 41)
    } else {
        Color::Rgb(183, 228, 208)
    }
}

pub fn success() -> Color {
    Color::Rgb(34, 197, 94) // green-500
}

pub fn error() -> Color {
    Color::Rgb(239, 68, 68) // red-500
}

pub fn warning() -> Color {
    Color::Rgb(234, 179, 8) // yellow-500
}

// ── Styles ──────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(border())
}

pub fn border_focused() -> Style {
    Style::default().fg(accent())
}

pub fn table_header() -> Style {
    Style::default().fg(dim()).add_modifier(Modifier::BOLD)
}

pub fn table_row() -> Style {
    Style::default().fg(text())
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(accent())
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

pub fn tab_active() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(dim())
}

pub fn key_hint_key() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(dim())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the active theme is process-global state.
    #[test]
    fn toggling_swaps_the_palette() {
        set(Theme::Light);
        let light_text = text();

        set(Theme::Dark);
        assert_eq!(current(), Theme::Dark);
        assert_ne!(text(), light_text);

        set(Theme::Light);
        assert_eq!(text(), light_text);
    }
}
