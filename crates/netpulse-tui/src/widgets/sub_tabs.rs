//! Inline tab strip used for the status filter row.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// Renders labels side by side; the active one is bracketed and highlighted.
pub fn render_sub_tabs<S: AsRef<str>>(labels: &[S], active_index: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        let label = label.as_ref();
        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(label.to_owned(), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}
