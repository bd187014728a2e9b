//! Grid screen — one card per device in the current filter.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use netpulse_core::{Device, DeviceId, StatusFilter};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{device_icon, rate_fmt, signal_bars, status_indicator};

const CARD_WIDTH: u16 = 32;
const CARD_HEIGHT: u16 = 8;

/// Cards per row for a content area `width` columns wide (borders included).
fn columns_for(width: u16) -> usize {
    usize::from((width.saturating_sub(2) / CARD_WIDTH).max(1))
}

pub struct GridScreen {
    focused: bool,
    devices: Arc<Vec<Device>>,
    filter: StatusFilter,
    selected: Option<DeviceId>,
    /// Index into the filtered list.
    cursor: usize,
    columns: usize,
}

impl GridScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            filter: StatusFilter::default(),
            selected: None,
            cursor: 0,
            columns: 1,
        }
    }

    fn visible(&self) -> Vec<&Device> {
        self.filter.apply(self.devices.iter())
    }

    fn cursor_device(&self) -> Option<&Device> {
        self.visible().get(self.cursor).copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn row_step(&self) -> isize {
        isize::try_from(self.columns).unwrap_or(1)
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, device: &Device, is_cursor: bool) {
        let is_selected = self.selected.as_ref() == Some(&device.id);
        let border = if is_selected {
            theme::border_selected()
        } else if is_cursor && self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let mut title = vec![Span::styled(
            format!(" {} ", device.name),
            theme::text().add_modifier(Modifier::BOLD),
        )];
        if is_selected {
            title.push(Span::styled("◆ ", Style::default().fg(theme::ELECTRIC_PURPLE)));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        let kind_color = device_icon::color(device.kind);
        let action_label = if device.is_online() {
            "Disconnect"
        } else {
            "Connect"
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} {:<12}", device_icon::glyph(device.kind), device.kind.label()),
                    Style::default().fg(kind_color),
                ),
                status_indicator::status_label_span(device.status),
            ]),
            Line::from(Span::styled(device.ip.clone(), theme::text())),
            Line::from(Span::styled(device.mac.clone(), theme::muted())),
            Line::from(vec![
                Span::styled("↓ ", Style::default().fg(theme::DOWNLOAD)),
                Span::styled(
                    format!("{:<11}", rate_fmt::fmt_mbps(device.bandwidth.download)),
                    theme::text(),
                ),
                Span::styled("↑ ", Style::default().fg(theme::UPLOAD)),
                Span::styled(rate_fmt::fmt_mbps(device.bandwidth.upload), theme::text()),
            ]),
            Line::from(vec![
                signal_bars::signal_span(device.signal_strength),
                Span::styled(
                    format!(" {:<6}", signal_bars::signal_label(device.signal_strength)),
                    theme::text(),
                ),
                Span::styled(
                    rate_fmt::fmt_last_seen(Utc::now(), device.last_seen),
                    theme::muted(),
                ),
            ]),
        ];
        if is_cursor {
            lines.push(Line::from(vec![
                Span::styled("t ", theme::key_hint_key()),
                Span::styled(format!("{action_label}  "), theme::key_hint()),
                Span::styled("d ", theme::key_hint_key()),
                Span::styled("Remove", theme::key_hint()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for GridScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-self.row_step()),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(self.row_step()),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.visible().len().saturating_sub(1);
            }
            KeyCode::Enter => {
                return Ok(self
                    .cursor_device()
                    .map(|d| Action::SelectDevice(d.id.clone())));
            }
            KeyCode::Char('t' | ' ') => {
                return Ok(self
                    .cursor_device()
                    .map(|d| Action::ToggleDevice(d.id.clone())));
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                return Ok(self
                    .cursor_device()
                    .map(|d| Action::RequestRemove(d.id.clone())));
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_cursor(self.row_step()),
            MouseEventKind::ScrollUp => self.move_cursor(-self.row_step()),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesUpdated(devices) => {
                self.devices = Arc::clone(devices);
                self.clamp_cursor();
            }
            Action::SelectionChanged(selected) => self.selected.clone_from(selected),
            Action::FilterChanged(filter) => {
                self.filter = *filter;
                self.cursor = 0;
            }
            Action::Resize(width, _) => self.columns = columns_for(*width),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = self.visible();
        let block = Block::default()
            .title(format!(
                " Devices · {} · {} shown ",
                self.filter.label(),
                visible.len()
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if visible.is_empty() {
            let y = inner.y + inner.height.saturating_sub(1) / 2;
            frame.render_widget(
                Paragraph::new("No devices match the current filter")
                    .style(theme::muted())
                    .alignment(Alignment::Center),
                Rect::new(inner.x, y, inner.width, 1.min(inner.height)),
            );
            return;
        }

        let columns = columns_for(area.width);
        let card_width = inner.width / u16::try_from(columns).unwrap_or(1);
        let rows_visible = usize::from((inner.height / CARD_HEIGHT).max(1));
        let cursor_row = self.cursor / columns;
        let first_row = cursor_row.saturating_sub(rows_visible - 1);

        for (index, device) in visible.iter().enumerate().skip(first_row * columns) {
            let row = index / columns - first_row;
            if row >= rows_visible {
                break;
            }
            let col = index % columns;
            let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
                break;
            };
            let y = inner.y + row * CARD_HEIGHT;
            let height = CARD_HEIGHT.min((inner.y + inner.height).saturating_sub(y));
            let card = Rect::new(inner.x + col * card_width, y, card_width, height);
            self.render_card(frame, card, device, index == self.cursor);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use netpulse_core::{DeviceStatus, seed_devices};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_with_seed() -> GridScreen {
        let mut screen = GridScreen::new();
        screen
            .update(&Action::DevicesUpdated(Arc::new(seed_devices(Utc::now()))))
            .unwrap();
        screen.update(&Action::Resize(100, 40)).unwrap();
        screen
    }

    fn press(screen: &mut GridScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn columns_follow_width() {
        assert_eq!(columns_for(10), 1);
        assert_eq!(columns_for(100), 3);
    }

    #[test]
    fn cursor_moves_by_rows_and_clamps() {
        let mut screen = screen_with_seed();
        assert_eq!(screen.columns, 3);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor, 3);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.cursor, 2);
        press(&mut screen, KeyCode::Char('G'));
        assert_eq!(screen.cursor, 7);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor, 7);
        press(&mut screen, KeyCode::Home);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn commands_target_the_cursor_card() {
        let mut screen = screen_with_seed();
        press(&mut screen, KeyCode::Right);
        let id = screen.cursor_device().unwrap().id.clone();

        assert!(matches!(press(&mut screen, KeyCode::Enter), Some(Action::SelectDevice(ref x)) if *x == id));
        assert!(matches!(press(&mut screen, KeyCode::Char('t')), Some(Action::ToggleDevice(ref x)) if *x == id));
        assert!(matches!(press(&mut screen, KeyCode::Delete), Some(Action::RequestRemove(ref x)) if *x == id));
    }

    #[test]
    fn filter_limits_cards_and_resets_cursor() {
        let mut screen = screen_with_seed();
        press(&mut screen, KeyCode::Char('G'));
        screen
            .update(&Action::FilterChanged(StatusFilter::Offline))
            .unwrap();
        assert_eq!(screen.cursor, 0);
        assert!(
            screen
                .visible()
                .iter()
                .all(|d| d.status == DeviceStatus::Offline)
        );
    }

    #[test]
    fn empty_filter_shows_placeholder() {
        let mut screen = GridScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No devices match the current filter"));

        assert!(press(&mut screen, KeyCode::Enter).is_none());
    }

    #[test]
    fn renders_device_cards() {
        let screen = screen_with_seed();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Main Router"));
        assert!(text.contains("Mbps"));
    }
}
