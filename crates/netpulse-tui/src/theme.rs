//! Neon palette and semantic styles.

use netpulse_core::DeviceStatus;
use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd
pub const DEEP_BLUE: Color = Color::Rgb(59, 130, 246); // #3b82f6

// ── Traffic ───────────────────────────────────────────────────────────

pub const DOWNLOAD: Color = LIGHT_BLUE;
pub const UPLOAD: Color = ELECTRIC_PURPLE;

/// Dot / label colour for a device status.
pub fn status_color(status: DeviceStatus) -> Color {
    match status {
        DeviceStatus::Online => SUCCESS_GREEN,
        DeviceStatus::Offline => ERROR_RED,
        DeviceStatus::Warning => ELECTRIC_YELLOW,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(NEON_CYAN)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Border of the selected device's card.
pub fn border_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Border of a required form field left blank.
pub fn border_invalid() -> Style {
    Style::default().fg(ERROR_RED)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn text() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Secondary text (IPs, MACs, timestamps).
pub fn muted() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}
