//! Mouse event handling.
//!
//! Wheel ticks become drag steps (released by the wheel gesture timeout),
//! clicks on a visible item animate it to the center.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::Wheel(-1),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Action::Wheel(1),
        MouseEventKind::Down(MouseButton::Left) => app
            .index_at(mouse.column, mouse.row)
            .map(Action::SelectIndex)
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}
