//! Topology screen — radial graph of every device on a braille canvas.
//!
//! Layout coordinates come from [`netpulse_core::topology::layout`] with the
//! y axis pointing down; the canvas y axis points up, so every y is flipped.
//! Terminal cells are roughly twice as tall as wide, so the canvas is laid
//! out at double height to keep the ring circular.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use netpulse_core::{Device, DeviceId, DeviceStatus, topology};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{self, Canvas, Circle, Context, Points},
    },
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{device_icon, status_indicator};

const PULSE_STEPS: u8 = 8;
const LABEL_MAX: usize = 16;

/// Half the on-canvas width of a label, for centering.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn half_width(label: &str) -> f64 {
    label.chars().count() as f64 / 2.0
}

pub struct TopologyScreen {
    focused: bool,
    devices: Arc<Vec<Device>>,
    selected: Option<DeviceId>,
    pulse: u8,
}

impl TopologyScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            selected: None,
            pulse: 0,
        }
    }

    /// Selection after stepping one device forward or back, wrapping.
    fn step_selection(&self, forward: bool) -> Option<DeviceId> {
        let len = self.devices.len();
        if len == 0 {
            return None;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| self.devices.iter().position(|d| &d.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.devices.get(next).map(|d| d.id.clone())
    }

    fn pulse_offset(&self) -> f64 {
        f64::from(self.pulse) * 0.25
    }

    fn paint(&self, ctx: &mut Context<'_>, width: f64, height: f64) {
        let graph = topology::layout(&self.devices, width, height);
        let flip = |y: f64| height - y;

        for link in graph.links() {
            ctx.draw(&canvas::Line {
                x1: link.from.x,
                y1: flip(link.from.y),
                x2: link.to.x,
                y2: flip(link.to.y),
                color: if link.active {
                    theme::SUCCESS_GREEN
                } else {
                    theme::BORDER_GRAY
                },
            });
        }
        ctx.layer();

        for device in &*self.devices {
            let Some(p) = graph.position(&device.id) else {
                continue;
            };
            let (x, y) = (p.x, flip(p.y));
            let radius = device_icon::node_radius(device.kind);
            let color = if device.status == DeviceStatus::Offline {
                theme::BORDER_GRAY
            } else {
                device_icon::color(device.kind)
            };
            ctx.draw(&Circle {
                x,
                y,
                radius,
                color,
            });

            if !device.kind.is_router() {
                ctx.draw(&Points {
                    coords: &[(x + radius * 0.8, y + radius * 0.8)],
                    color: theme::status_color(device.status),
                });
            }

            if self.selected.as_ref() == Some(&device.id) {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius + 1.0 + self.pulse_offset(),
                    color: theme::ELECTRIC_PURPLE,
                });
            }
        }
        ctx.layer();

        for device in &*self.devices {
            let Some(p) = graph.position(&device.id) else {
                continue;
            };
            let (x, y) = (p.x, flip(p.y));
            let radius = device_icon::node_radius(device.kind);
            ctx.print(
                x,
                y,
                Span::styled(
                    device_icon::glyph(device.kind),
                    Style::default().fg(device_icon::color(device.kind)),
                ),
            );

            let label: String = device.name.chars().take(LABEL_MAX).collect();
            let style = if self.selected.as_ref() == Some(&device.id) {
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::text()
            };
            ctx.print(
                x - half_width(&label),
                y - radius - 2.0,
                Span::styled(label, style),
            );
        }
    }
}

impl Component for TopologyScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let forward = match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j' | 'l') => true,
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k' | 'h') => false,
            KeyCode::Enter if self.selected.is_none() => true,
            _ => return Ok(None),
        };
        Ok(self.step_selection(forward).map(Action::SelectDevice))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesUpdated(devices) => self.devices = Arc::clone(devices),
            Action::SelectionChanged(selected) => self.selected.clone_from(selected),
            Action::Tick => self.pulse = (self.pulse + 1) % PULSE_STEPS,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Network Topology · {} devices ", self.devices.len()))
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

        let [canvas_area, legend_area, hints_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let width = f64::from(canvas_area.width);
        let height = f64::from(canvas_area.height) * 2.0;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| self.paint(ctx, width, height));
        frame.render_widget(canvas, canvas_area);

        let legend = Line::from(vec![
            Span::styled(
                format!(" {} ", device_icon::glyph(netpulse_core::DeviceKind::Router)),
                Style::default().fg(device_icon::color(netpulse_core::DeviceKind::Router)),
            ),
            Span::styled("Router   ", theme::text()),
            status_indicator::status_span(DeviceStatus::Online),
            Span::styled(" Online   ", theme::text()),
            status_indicator::status_span(DeviceStatus::Warning),
            Span::styled(" Warning   ", theme::text()),
            status_indicator::status_span(DeviceStatus::Offline),
            Span::styled(" Offline", theme::text()),
        ]);
        frame.render_widget(Paragraph::new(legend), legend_area);

        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("cycle selection  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("select first", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
