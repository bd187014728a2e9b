//! Six-card summary row: counts per status plus aggregate throughput.

use netpulse_core::NetworkStats;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme;
use crate::widgets::rate_fmt::fmt_mbps_total;

pub fn render_stats_panel(frame: &mut Frame, area: Rect, stats: &NetworkStats) {
    let cards: [(&str, String, Color); 6] = [
        ("Total", stats.total.to_string(), theme::NEON_CYAN),
        ("Online", stats.online.to_string(), theme::SUCCESS_GREEN),
        ("Offline", stats.offline.to_string(), theme::ERROR_RED),
        ("Warning", stats.warning.to_string(), theme::ELECTRIC_YELLOW),
        ("↓ Download", fmt_mbps_total(stats.total_download), theme::DOWNLOAD),
        ("↑ Upload", fmt_mbps_total(stats.total_upload), theme::UPLOAD),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 6); 6]).split(area);
    for ((label, value, color), card_area) in cards.into_iter().zip(areas.iter()) {
        let block = Block::default()
            .title(Span::styled(format!(" {label} "), theme::muted()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let value = Paragraph::new(Line::from(Span::styled(
            format!(" {value}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(block);
        frame.render_widget(value, *card_area);
    }
}
