//! Device status indicator — ●/○/◐ with color mapping.

use netpulse_core::DeviceStatus;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::theme;

pub fn status_char(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Online => "●",
        DeviceStatus::Offline => "○",
        DeviceStatus::Warning => "◐",
    }
}

/// Status dot alone.
pub fn status_span(status: DeviceStatus) -> Span<'static> {
    Span::styled(
        status_char(status),
        Style::default().fg(theme::status_color(status)),
    )
}

/// Status dot followed by the lowercase status name.
pub fn status_label_span(status: DeviceStatus) -> Span<'static> {
    Span::styled(
        format!("{} {status}", status_char(status)),
        Style::default().fg(theme::status_color(status)),
    )
}
