//! Shared interface of the two dashboard screens and the Add Device modal.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// A piece of UI driven by the app loop.
///
/// Input handlers and `update` return at most one follow-up [`Action`]; the
/// app routes it back through `process_action`.
pub trait Component: Send {
    /// Hands over the action sender once, before the first event.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// React to a broadcast action such as `DevicesUpdated` or `Tick`.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Toggled by the app when the active screen changes.
    fn set_focused(&mut self, _focused: bool) {}
}
