//! Signal strength bars — ▂▄▆█ with color thresholds.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::theme;

/// Bars for a signal percentage.
///
/// | Bars    | Percent  | Color          |
/// |---------|----------|----------------|
/// | `▂▄▆█` | >= 75    | Success Green  |
/// | `▂▄▆ ` | 50 - 74  | Neon Cyan      |
/// | `▂▄  ` | 25 - 49  | Electric Yellow|
/// | `▂   ` | 1 - 24   | Coral          |
/// | `·   ` | 0        | Error Red      |
///
/// Wired devices (no signal) render as a gray dotted placeholder.
pub fn signal_span(percent: Option<u8>) -> Span<'static> {
    let Some(percent) = percent else {
        return Span::styled("····", Style::default().fg(theme::BORDER_GRAY));
    };

    let (bars, color) = match percent {
        75.. => ("▂▄▆█", theme::SUCCESS_GREEN),
        50..=74 => ("▂▄▆ ", theme::NEON_CYAN),
        25..=49 => ("▂▄  ", theme::ELECTRIC_YELLOW),
        1..=24 => ("▂   ", theme::CORAL),
        0 => ("·   ", theme::ERROR_RED),
    };

    Span::styled(bars, Style::default().fg(color))
}

/// "92%", or "wired" when the device reports no signal.
pub fn signal_label(percent: Option<u8>) -> String {
    percent.map_or_else(|| "wired".to_owned(), |p| format!("{p}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(signal_span(Some(100)).content, "▂▄▆█");
        assert_eq!(signal_span(Some(75)).content, "▂▄▆█");
        assert_eq!(signal_span(Some(74)).content, "▂▄▆ ");
        assert_eq!(signal_span(Some(30)).content, "▂▄  ");
        assert_eq!(signal_span(Some(5)).content, "▂   ");
        assert_eq!(signal_span(Some(0)).content, "·   ");
        assert_eq!(signal_span(None).content, "····");
    }

    #[test]
    fn labels() {
        assert_eq!(signal_label(Some(92)), "92%");
        assert_eq!(signal_label(None), "wired");
    }
}
