//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use snappick::Orientation;

use crate::app::App;

use super::Action;

/// Handle keyboard events and return the appropriate action.
///
/// Arrow keys along the picker's axis step through values; the other pair
/// is ignored so that a horizontal picker does not react to Up/Down.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    let vertical = app.picker.orientation() == Orientation::Vertical;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Confirm,

        KeyCode::Up | KeyCode::Char('k') if vertical => Action::Step(-1),
        KeyCode::Down | KeyCode::Char('j') if vertical => Action::Step(1),
        KeyCode::Left | KeyCode::Char('h') if !vertical => Action::Step(-1),
        KeyCode::Right | KeyCode::Char('l') if !vertical => Action::Step(1),

        KeyCode::Home | KeyCode::Char('g') => Action::First,
        KeyCode::End | KeyCode::Char('G') => Action::Last,

        KeyCode::Char('o') => Action::ToggleOrientation,
        KeyCode::Char('c') => Action::ToggleCyclic,
        _ => Action::None,
    }
}
