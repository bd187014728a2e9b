//! Application core — event loop, state ownership, action dispatch.
//!
//! The app loop is the only writer of [`DashboardState`]. Background tasks
//! (terminal events, the simulator timer) only send messages; after every
//! mutation the loop broadcasts a fresh snapshot to all screens.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use netpulse_config::Config;
use netpulse_core::{
    BandwidthSimulator, DashboardState, DeviceDraft, NewDevice, StatusFilter, seed_devices,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::add_device::AddDeviceForm;
use crate::screens::create_screens;
use crate::sim_bridge::spawn_simulator;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::rate_fmt::fmt_mbps;
use crate::widgets::stats_panel::render_stats_panel;
use crate::widgets::status_indicator::status_label_span;
use crate::widgets::sub_tabs::render_sub_tabs;

const TOAST_TTL: Duration = Duration::from_secs(3);

pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    state: DashboardState,
    simulator: BandwidthSimulator,
    simulator_enabled: bool,
    rng: StdRng,
    /// Cancels the simulator timer; fired on exit and on drop.
    sim_cancel: CancellationToken,
    sim_task: Option<JoinHandle<()>>,

    intake_defaults: DeviceDraft,
    /// Open Add Device modal. Captures all input except Ctrl+C.
    add_form: Option<AddDeviceForm>,
    pending_confirm: Option<ConfirmAction>,
    notification: Option<(Notification, Instant)>,

    tick_rate: Duration,
    render_rate: Duration,
    /// UI ticks since start; drives the LIVE badge blink.
    ticks: u64,
}

impl App {
    /// Build the app from resolved configuration. `rng_seed` makes the
    /// simulator reproducible.
    pub fn new(config: &Config, rng_seed: Option<u64>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let devices = if config.seed_devices {
            seed_devices(Utc::now())
        } else {
            Vec::new()
        };
        let rng = rng_seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Self {
            active_screen: config.ui.default_view.into(),
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            terminal_size: (80, 24),
            action_tx,
            action_rx,
            state: DashboardState::new(devices),
            simulator: config.simulator(),
            simulator_enabled: config.simulator.enabled,
            rng,
            sim_cancel: CancellationToken::new(),
            sim_task: None,
            intake_defaults: config.intake_draft(),
            add_form: None,
            pending_confirm: None,
            notification: None,
            tick_rate: config.tick_rate(),
            render_rate: config.render_rate(),
            ticks: 0,
        }
    }

    /// Mount screens and push the initial state into them.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        let (w, h) = self.terminal_size;
        self.broadcast(&Action::Resize(w, h))?;
        self.broadcast(&Action::FilterChanged(self.state.filter()))?;
        self.publish_selection()?;
        self.publish_devices()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        if self.simulator_enabled {
            self.sim_task = Some(spawn_simulator(
                self.simulator.interval,
                self.action_tx.clone(),
                self.sim_cancel.clone(),
            ));
        }

        let mut events = EventReader::new(self.tick_rate, self.render_rate);
        info!(devices = self.state.registry().len(), "dashboard started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if matches!(action, Action::Render) {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.sim_cancel.cancel();
        events.stop();
        if let Some(task) = self.sim_task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "simulator task ended abnormally");
            }
        }
        tui.exit();
        info!("dashboard stopped");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if let Some(form) = self.add_form.as_mut() {
            return form.handle_key_event(key);
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('n' | 'a')) => {
                return Ok(Some(Action::OpenAddDevice));
            }
            (_, KeyCode::Char('f')) => {
                return Ok(Some(Action::SetFilter(self.state.filter().next())));
            }
            (_, KeyCode::Char('F')) => {
                return Ok(Some(Action::SetFilter(self.state.filter().prev())));
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let screen = c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(ScreenId::from_number);
                if let Some(screen) = screen {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.add_form.is_some() || self.pending_confirm.is_some() {
            return Ok(None);
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > TOAST_TTL)
                {
                    self.notification = None;
                }
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Render => {}

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
                self.broadcast(action)?;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::DevicesUpdated(_) | Action::SelectionChanged(_) | Action::FilterChanged(_) => {
                self.broadcast(action)?;
            }

            Action::SimulatorTick => {
                if self.state.simulate(&self.simulator, &mut self.rng) > 0 {
                    self.publish_devices()?;
                }
            }

            Action::SelectDevice(id) => {
                if self.state.select(id) {
                    debug!(device = %id, "device selected");
                    self.publish_selection()?;
                }
            }

            Action::ToggleDevice(id) => {
                let toggled = self.state.toggle_device(id).map(|d| {
                    let verb = if d.is_online() {
                        "connected"
                    } else {
                        "disconnected"
                    };
                    format!("{} {verb}", d.name)
                });
                if let Some(message) = toggled {
                    info!(device = %id, "{message}");
                    self.notify(Notification::info(message));
                    self.publish_devices()?;
                }
            }

            Action::RequestRemove(id) => {
                if let Some(device) = self.state.registry().get(id) {
                    let confirm = ConfirmAction::RemoveDevice {
                        id: id.clone(),
                        name: device.name.clone(),
                    };
                    self.action_tx.send(Action::ShowConfirm(confirm))?;
                }
            }

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm)?;
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::SetFilter(filter) => {
                self.state.set_filter(*filter);
                self.broadcast(&Action::FilterChanged(*filter))?;
            }

            Action::OpenAddDevice => {
                if self.add_form.is_none() {
                    self.add_form = Some(AddDeviceForm::new(&self.intake_defaults));
                }
            }

            Action::CloseAddDevice => self.add_form = None,

            Action::SubmitDevice(payload) => self.add_device(payload.clone())?,

            Action::ToggleHelp => self.help_visible = !self.help_visible,
        }

        Ok(())
    }

    // ── State helpers ────────────────────────────────────────────

    /// Deliver an action to every screen, queueing any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn publish_devices(&mut self) -> Result<()> {
        let snapshot = self.state.snapshot();
        self.broadcast(&Action::DevicesUpdated(snapshot))
    }

    fn publish_selection(&mut self) -> Result<()> {
        let selected = self.state.selected().cloned();
        self.broadcast(&Action::SelectionChanged(selected))
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    fn add_device(&mut self, payload: NewDevice) -> Result<()> {
        let name = match self.state.add_from_intake(payload) {
            Ok(device) => device.name.clone(),
            Err(e) => {
                warn!(error = %e, "device rejected");
                return Ok(());
            }
        };
        self.add_form = None;
        self.notify(Notification::success(format!("Added {name}")));
        self.publish_devices()
    }

    fn execute_confirm(&mut self, confirm: ConfirmAction) -> Result<()> {
        match confirm {
            ConfirmAction::RemoveDevice { id, name } => {
                if self.state.remove_device(&id).is_some() {
                    self.notify(Notification::warning(format!("Removed {name}")));
                    self.publish_devices()?;
                    self.publish_selection()?;
                }
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header, stats, filters, content, tabs, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);
        render_stats_panel(frame, stats, &self.state.stats());
        self.render_filter_tabs(frame, filters);
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content);
        }
        self.render_tab_bar(frame, tabs);
        self.render_status_bar(frame, status);

        if let Some((ref notification, _)) = self.notification {
            render_notification(frame, area, notification);
        }
        if let Some(ref form) = self.add_form {
            form.render(frame, area);
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [logo_area, badge_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(10)]).areas(area);

        let logo = Line::from(vec![
            Span::styled(" ◉ NetPulse ", theme::title_style()),
            Span::styled("Home Network Monitor", theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(logo), logo_area);

        let live = Style::default().fg(theme::SUCCESS_GREEN);
        let badge = match (self.simulator_enabled, (self.ticks / 2) % 2 == 0) {
            (false, _) => Span::styled("○ PAUSED ", theme::muted()),
            (true, true) => Span::styled("● LIVE ", live.add_modifier(Modifier::BOLD)),
            (true, false) => Span::styled("○ LIVE ", live.add_modifier(Modifier::DIM)),
        };
        frame.render_widget(
            Paragraph::new(Line::from(badge)).alignment(Alignment::Right),
            badge_area,
        );
    }

    fn render_filter_tabs(&self, frame: &mut Frame, area: Rect) {
        let labels: Vec<String> = StatusFilter::ALL
            .iter()
            .map(|f| format!("{} ({})", f.label(), f.count(self.state.registry().iter())))
            .collect();
        let mut line = render_sub_tabs(&labels, self.state.filter().index());
        line.spans.insert(0, Span::styled(" f ", theme::key_hint_key()));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        if let Some(device) = self.state.selected_device() {
            spans.extend([
                Span::styled("◆ ", Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled(
                    device.name.clone(),
                    theme::text().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" · {} · {} · ", device.ip, device.kind.label()),
                    theme::muted(),
                ),
                status_label_span(device.status),
                Span::styled(
                    format!(
                        "  ↓ {}  ↑ {}",
                        fmt_mbps(device.bandwidth.download),
                        fmt_mbps(device.bandwidth.upload)
                    ),
                    theme::text(),
                ),
            ]);
        } else {
            spans.push(Span::styled("no device selected", theme::muted()));
        }
        spans.push(Span::styled(
            " │ ? help  n add  f filter  q quit",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.sim_cancel.cancel();
    }
}

// ── Overlays ─────────────────────────────────────────────────────────

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn overlay_block(frame: &mut Frame, area: Rect, title: &'static str, border: Style) -> Rect {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        area,
    );
    let block = Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn key_row(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
        Span::styled(description, theme::key_hint()),
    ])
}

fn section(title: &'static str) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default().fg(theme::NEON_CYAN),
        )),
        Line::from(Span::styled(
            format!("  {}", "─".repeat(title.chars().count())),
            theme::key_hint(),
        )),
    ]
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let inner = overlay_block(
        frame,
        centered(area, 56, 23),
        " Keyboard Shortcuts ",
        theme::border_focused(),
    );

    let mut text = vec![Line::from("")];
    text.extend(section("Navigation"));
    text.extend([
        key_row("1 / 2", "Grid / Topology"),
        key_row("Tab", "Switch view"),
        key_row("←↓↑→ hjkl", "Move between devices"),
        key_row("Enter", "Select device"),
    ]);
    text.push(Line::from(""));
    text.extend(section("Devices"));
    text.extend([
        key_row("t / Space", "Connect / disconnect"),
        key_row("d / Del", "Remove (asks first)"),
        key_row("n / a", "Add a device"),
        key_row("f / F", "Next / previous filter"),
    ]);
    text.push(Line::from(""));
    text.extend(section("Global"));
    text.extend([key_row("?", "This help"), key_row("q / Ctrl+C", "Quit")]);
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "                       Esc or ? to close",
        theme::key_hint(),
    )));

    frame.render_widget(Paragraph::new(text), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let inner = overlay_block(
        frame,
        centered(area, 50, 5),
        " Confirm ",
        Style::default().fg(theme::ELECTRIC_YELLOW),
    );
    let text = vec![
        Line::from(Span::styled(format!("  {confirm}"), theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16;
    let toast_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 2),
        width,
        height.min(area.height),
    );

    let (color, icon) = match notification.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
        NotificationLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
        NotificationLevel::Info => (theme::NEON_CYAN, "·"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notification.message.clone(), theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use netpulse_core::{Bandwidth, DeviceId, DeviceKind, DeviceStatus};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        let mut app = App::new(&Config::default(), Some(7));
        app.init_screens().unwrap();
        app
    }

    /// Run everything queued on the action channel, as the loop would.
    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap()
    }

    fn payload(name: &str) -> NewDevice {
        NewDevice {
            name: name.into(),
            kind: DeviceKind::Iot,
            ip: "192.168.1.90".into(),
            mac: "AA:BB:CC:DD:EE:90".into(),
            status: DeviceStatus::Online,
            signal_strength: Some(70),
        }
    }

    #[test]
    fn starts_with_seed_network() {
        let app = app();
        assert_eq!(app.state.registry().len(), 8);
        assert_eq!(app.active_screen, ScreenId::Grid);
    }

    #[test]
    fn no_seed_starts_empty() {
        let config = Config {
            seed_devices: false,
            ..Config::default()
        };
        let app = App::new(&config, Some(1));
        assert!(app.state.registry().is_empty());
    }

    #[test]
    fn submit_adds_one_device_and_closes_form() {
        let mut app = app();
        app.process_action(&Action::OpenAddDevice).unwrap();
        assert!(app.add_form.is_some());

        app.process_action(&Action::SubmitDevice(payload("Doorbell")))
            .unwrap();

        assert_eq!(app.state.registry().len(), 9);
        assert!(app.add_form.is_none());
        let added = app.state.registry().iter().last().unwrap();
        assert_eq!(added.name, "Doorbell");
        assert_eq!(added.bandwidth, Bandwidth::ZERO);
        let (toast, _) = app.notification.as_ref().unwrap();
        assert_eq!(toast.message, "Added Doorbell");
    }

    #[test]
    fn remove_goes_through_confirmation() {
        let mut app = app();
        let id = DeviceId::from("2");
        app.process_action(&Action::SelectDevice(id.clone())).unwrap();
        app.process_action(&Action::RequestRemove(id.clone())).unwrap();
        drain(&mut app);
        assert!(app.pending_confirm.is_some());
        assert!(app.state.registry().contains(&id));

        app.process_action(&Action::ConfirmYes).unwrap();
        assert!(!app.state.registry().contains(&id));
        assert_eq!(app.state.selected(), None);
        assert_eq!(app.state.registry().len(), 7);
    }

    #[test]
    fn declined_removal_keeps_device() {
        let mut app = app();
        let id = DeviceId::from("3");
        app.process_action(&Action::RequestRemove(id.clone())).unwrap();
        drain(&mut app);
        app.process_action(&Action::ConfirmNo).unwrap();
        assert!(app.pending_confirm.is_none());
        assert!(app.state.registry().contains(&id));
    }

    #[test]
    fn removing_unknown_id_asks_nothing() {
        let mut app = app();
        app.process_action(&Action::RequestRemove(DeviceId::from("nope")))
            .unwrap();
        drain(&mut app);
        assert!(app.pending_confirm.is_none());
        assert_eq!(app.state.registry().len(), 8);
    }

    #[test]
    fn toggle_offline_zeroes_bandwidth() {
        let mut app = app();
        let id = DeviceId::from("2");
        app.process_action(&Action::ToggleDevice(id.clone())).unwrap();
        let device = app.state.registry().get(&id).unwrap();
        assert_eq!(device.status, DeviceStatus::Offline);
        assert_eq!(device.bandwidth, Bandwidth::ZERO);
        assert!(app.notification.is_some());
    }

    #[test]
    fn simulator_ticks_keep_rates_non_negative() {
        let mut app = app();
        for _ in 0..500 {
            app.process_action(&Action::SimulatorTick).unwrap();
        }
        for device in app.state.registry().iter() {
            assert!(device.bandwidth.download >= 0.0);
            assert!(device.bandwidth.upload >= 0.0);
        }
    }

    /// Press a key and run whatever it triggers.
    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = key(app, code, KeyModifiers::NONE) {
            app.process_action(&action).unwrap();
        }
        drain(app);
    }

    #[test]
    fn blank_name_from_form_leaves_registry_unchanged() {
        let mut app = app();
        let before = app.state.registry().len();

        press(&mut app, KeyCode::Char('n'));
        assert!(app.add_form.is_some());
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        for c in "AA:BB:CC:DD:EE:42".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.registry().len(), before);
        assert!(app.add_form.is_some());
        assert!(app.notification.is_none());
    }

    #[test]
    fn form_captures_keys_but_not_ctrl_c() {
        let mut app = app();
        app.process_action(&Action::OpenAddDevice).unwrap();

        assert!(key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE).is_none());
        assert!(app.running);
        assert!(matches!(
            key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn global_keys() {
        let mut app = app();
        assert!(matches!(
            key(&mut app, KeyCode::Char('2'), KeyModifiers::NONE),
            Some(Action::SwitchScreen(ScreenId::Topology))
        ));
        assert!(matches!(
            key(&mut app, KeyCode::Char('f'), KeyModifiers::NONE),
            Some(Action::SetFilter(StatusFilter::Online))
        ));
        assert!(matches!(
            key(&mut app, KeyCode::Char('F'), KeyModifiers::SHIFT),
            Some(Action::SetFilter(StatusFilter::Warning))
        ));
        assert!(matches!(
            key(&mut app, KeyCode::Char('n'), KeyModifiers::NONE),
            Some(Action::OpenAddDevice)
        ));
    }

    #[test]
    fn filter_change_reaches_state() {
        let mut app = app();
        app.process_action(&Action::SetFilter(StatusFilter::Online))
            .unwrap();
        assert_eq!(app.state.filter(), StatusFilter::Online);
        assert!(
            app.state
                .visible_devices()
                .iter()
                .all(|d| d.status == DeviceStatus::Online)
        );
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut app = app();
        app.notification = Some((
            Notification::info("old"),
            Instant::now().checked_sub(TOAST_TTL * 2).unwrap(),
        ));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[test]
    fn drop_cancels_simulator() {
        let app = app();
        let token = app.sim_cancel.clone();
        drop(app);
        assert!(token.is_cancelled());
    }

    #[test]
    fn renders_chrome() {
        let mut app = app();
        app.process_action(&Action::SelectDevice(DeviceId::from("1")))
            .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("NetPulse"));
        assert!(text.contains("LIVE"));
        assert!(text.contains("Online (6)"));
        assert!(text.contains("Main Router"));
    }
}
