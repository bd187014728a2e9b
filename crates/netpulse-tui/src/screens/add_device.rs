//! Add Device modal.
//!
//! Three free-text fields backed by `tui-input`, cyclic selects for kind
//! and status, and a signal slider. Enter validates through
//! [`DeviceDraft::validate`]; a rejected submission keeps the form open and
//! outlines the blank required fields in red.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use netpulse_core::{DeviceDraft, DeviceKind, DeviceStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::debug;
use tui_input::{Input, InputRequest};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const SIGNAL_STEP: u8 = 5;
const FORM_WIDTH: u16 = 56;
const FIELD_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Kind,
    Ip,
    Mac,
    Status,
    Signal,
}

impl Field {
    const ALL: [Field; 6] = [
        Self::Name,
        Self::Kind,
        Self::Ip,
        Self::Mac,
        Self::Status,
        Self::Signal,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Device Name *",
            Self::Kind => "Device Type",
            Self::Ip => "IP Address *",
            Self::Mac => "MAC Address *",
            Self::Status => "Status",
            Self::Signal => "Signal Strength",
        }
    }

    fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }
}

/// Step to the neighbour of `current` in `all`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let Some(idx) = all.iter().position(|v| *v == current) else {
        return current;
    };
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    all.get(next).copied().unwrap_or(current)
}

fn cycle_enum<T: IntoEnumIterator + Copy + PartialEq>(current: T, forward: bool) -> T {
    let all: Vec<T> = T::iter().collect();
    cycle(&all, current, forward)
}

pub struct AddDeviceForm {
    name: Input,
    ip: Input,
    mac: Input,
    kind: DeviceKind,
    status: DeviceStatus,
    signal: u8,
    field: Field,
    /// Set after the first rejected submit; enables the required-field cue.
    attempted: bool,
}

impl AddDeviceForm {
    pub fn new(defaults: &DeviceDraft) -> Self {
        Self {
            name: Input::new(defaults.name.clone()),
            ip: Input::new(defaults.ip.clone()),
            mac: Input::new(defaults.mac.clone()),
            kind: defaults.kind,
            status: defaults.status,
            signal: defaults.signal_strength.min(100),
            field: Field::Name,
            attempted: false,
        }
    }

    /// Current form contents, unvalidated.
    pub fn draft(&self) -> DeviceDraft {
        DeviceDraft {
            name: self.name.value().to_owned(),
            kind: self.kind,
            ip: self.ip.value().to_owned(),
            mac: self.mac.value().to_owned(),
            status: self.status,
            signal_strength: self.signal,
        }
    }

    fn input(&self, field: Field) -> Option<&Input> {
        match field {
            Field::Name => Some(&self.name),
            Field::Ip => Some(&self.ip),
            Field::Mac => Some(&self.mac),
            Field::Kind | Field::Status | Field::Signal => None,
        }
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut Input> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Ip => Some(&mut self.ip),
            Field::Mac => Some(&mut self.mac),
            Field::Kind | Field::Status | Field::Signal => None,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        match self.draft().validate() {
            Ok(payload) => Some(Action::SubmitDevice(payload)),
            Err(e) => {
                debug!(error = %e, "add device form rejected");
                self.attempted = true;
                None
            }
        }
    }

    /// Left/right on a non-text field.
    fn adjust(&mut self, forward: bool) {
        match self.field {
            Field::Kind => self.kind = cycle_enum(self.kind, forward),
            Field::Status => self.status = cycle_enum(self.status, forward),
            Field::Signal => {
                self.signal = if forward {
                    self.signal.saturating_add(SIGNAL_STEP).min(100)
                } else {
                    self.signal.saturating_sub(SIGNAL_STEP)
                };
            }
            Field::Name | Field::Ip | Field::Mac => {}
        }
    }

    fn is_blank(&self, field: Field) -> bool {
        self.input(field)
            .is_some_and(|input| input.value().trim().is_empty())
    }

    fn field_block(&self, field: Field) -> Block<'static> {
        let border = if self.attempted && self.is_blank(field) {
            theme::border_invalid()
        } else if field == self.field {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        Block::default()
            .title(Span::styled(format!(" {} ", field.label()), theme::muted()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
    }

    fn field_line(&self, field: Field, width: u16) -> Line<'static> {
        let focused = field == self.field;
        let arrow_style = if focused {
            theme::key_hint_key()
        } else {
            theme::muted()
        };
        match field {
            Field::Name | Field::Ip | Field::Mac => {
                let value = self.input(field).map_or_else(String::new, |input| {
                    let scroll = input.visual_scroll(usize::from(width));
                    input.value().chars().skip(scroll).collect()
                });
                Line::from(Span::styled(value, theme::text()))
            }
            Field::Kind => Line::from(vec![
                Span::styled("◀ ", arrow_style),
                Span::styled(self.kind.label(), theme::text()),
                Span::styled(" ▶", arrow_style),
            ]),
            Field::Status => Line::from(vec![
                Span::styled("◀ ", arrow_style),
                Span::styled(
                    self.status.label(),
                    Style::default().fg(theme::status_color(self.status)),
                ),
                Span::styled(" ▶", arrow_style),
            ]),
            Field::Signal => {
                let track = width.saturating_sub(7);
                let filled = u16::try_from(u32::from(self.signal) * u32::from(track) / 100)
                    .unwrap_or(track);
                Line::from(vec![
                    Span::styled(
                        "█".repeat(usize::from(filled)),
                        Style::default().fg(theme::NEON_CYAN),
                    ),
                    Span::styled(
                        "░".repeat(usize::from(track.saturating_sub(filled))),
                        theme::muted(),
                    ),
                    Span::styled(format!(" {:>3}%", self.signal), theme::text()),
                ])
            }
        }
    }
}

impl Component for AddDeviceForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let text_field = self.input(self.field).is_some();
        let request = match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return Ok(Some(Action::CloseAddDevice)),
            (_, KeyCode::Enter) => return Ok(self.submit()),
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.field = self.field.next();
                return Ok(None);
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.field = self.field.prev();
                return Ok(None);
            }
            (_, KeyCode::Left) if !text_field => {
                self.adjust(false);
                return Ok(None);
            }
            (_, KeyCode::Right | KeyCode::Char(' ')) if !text_field => {
                self.adjust(true);
                return Ok(None);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => InputRequest::DeleteLine,
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => InputRequest::DeletePrevWord,
            (_, KeyCode::Char(c)) => InputRequest::InsertChar(c),
            (_, KeyCode::Backspace) => InputRequest::DeletePrevChar,
            (_, KeyCode::Delete) => InputRequest::DeleteNextChar,
            (_, KeyCode::Left) => InputRequest::GoToPrevChar,
            (_, KeyCode::Right) => InputRequest::GoToNextChar,
            (_, KeyCode::Home) => InputRequest::GoToStart,
            (_, KeyCode::End) => InputRequest::GoToEnd,
            _ => return Ok(None),
        };

        if let Some(input) = self.input_mut(self.field) {
            input.handle(request);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = FORM_WIDTH.min(area.width.saturating_sub(4));
        let height = (FIELD_HEIGHT * 6 + 3).min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let form_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, form_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            form_area,
        );

        let block = Block::default()
            .title(" Add New Device ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_selected());
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); Field::ALL.len()];
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (field, row) in Field::ALL.into_iter().zip(rows.iter()) {
            let block = self.field_block(field);
            let field_inner = block.inner(*row);
            let line = self.field_line(field, field_inner.width);
            frame.render_widget(Paragraph::new(line).block(block), *row);

            if field == self.field {
                if let Some(input) = self.input(field) {
                    let scroll = input.visual_scroll(usize::from(field_inner.width));
                    let offset = u16::try_from(input.visual_cursor().saturating_sub(scroll))
                        .unwrap_or(0);
                    frame.set_cursor_position(Position::new(
                        field_inner.x + offset.min(field_inner.width.saturating_sub(1)),
                        field_inner.y,
                    ));
                }
            }
        }

        if let Some(hint_area) = rows.get(Field::ALL.len()) {
            let hints = Line::from(vec![
                Span::styled(" Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("←→ ", theme::key_hint_key()),
                Span::styled("change  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("add  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint().add_modifier(Modifier::DIM)),
            ]);
            frame.render_widget(Paragraph::new(hints), *hint_area);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(form: &mut AddDeviceForm, code: KeyCode) -> Option<Action> {
        form.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(form: &mut AddDeviceForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    fn filled_form() -> AddDeviceForm {
        let mut form = AddDeviceForm::new(&DeviceDraft::default());
        type_str(&mut form, "Kitchen Speaker");
        press(&mut form, KeyCode::Tab); // kind
        press(&mut form, KeyCode::Tab); // ip
        type_str(&mut form, "77");
        press(&mut form, KeyCode::Tab); // mac
        type_str(&mut form, "aa:bb:cc:dd:ee:77");
        form
    }

    #[test]
    fn starts_from_defaults() {
        let form = AddDeviceForm::new(&DeviceDraft::default());
        assert_eq!(form.draft(), DeviceDraft::default());
    }

    #[test]
    fn valid_submission_emits_payload() {
        let mut form = filled_form();
        let Some(Action::SubmitDevice(payload)) = press(&mut form, KeyCode::Enter) else {
            panic!("expected SubmitDevice");
        };
        assert_eq!(payload.name, "Kitchen Speaker");
        assert_eq!(payload.ip, "192.168.1.77");
        assert_eq!(payload.mac, "AA:BB:CC:DD:EE:77");
        assert_eq!(payload.kind, DeviceKind::Laptop);
        assert_eq!(payload.signal_strength, Some(80));
    }

    #[test]
    fn empty_name_is_rejected_silently() {
        let mut form = AddDeviceForm::new(&DeviceDraft::default());
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "AA:BB:CC:DD:EE:01");

        assert!(press(&mut form, KeyCode::Enter).is_none());
        assert!(form.attempted);
        assert!(form.is_blank(Field::Name));
        assert!(!form.is_blank(Field::Mac));
    }

    #[test]
    fn selects_cycle_and_wrap() {
        let mut form = AddDeviceForm::new(&DeviceDraft::default());
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Right);
        assert_eq!(form.kind, DeviceKind::Phone);
        press(&mut form, KeyCode::Left);
        press(&mut form, KeyCode::Left);
        assert_eq!(form.kind, DeviceKind::Router);
        press(&mut form, KeyCode::Left);
        assert_eq!(form.kind, DeviceKind::Desktop);

        form.field = Field::Status;
        press(&mut form, KeyCode::Right);
        assert_eq!(form.status, DeviceStatus::Offline);
    }

    #[test]
    fn signal_slider_is_bounded() {
        let mut form = AddDeviceForm::new(&DeviceDraft::default());
        form.field = Field::Signal;
        for _ in 0..10 {
            press(&mut form, KeyCode::Right);
        }
        assert_eq!(form.signal, 100);
        for _ in 0..30 {
            press(&mut form, KeyCode::Left);
        }
        assert_eq!(form.signal, 0);
    }

    #[test]
    fn escape_cancels() {
        let mut form = filled_form();
        assert!(matches!(
            press(&mut form, KeyCode::Esc),
            Some(Action::CloseAddDevice)
        ));
    }

    #[test]
    fn field_navigation_wraps() {
        let mut form = AddDeviceForm::new(&DeviceDraft::default());
        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.field, Field::Signal);
        press(&mut form, KeyCode::Down);
        assert_eq!(form.field, Field::Name);
    }
}
