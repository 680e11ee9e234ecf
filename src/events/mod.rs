//! Terminal input handling.
//!
//! Keyboard and mouse events are translated into [`Action`]s, which the
//! [`App`](crate::app::App) applies to the picker.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::Action;
pub use handler::EventHandler;
