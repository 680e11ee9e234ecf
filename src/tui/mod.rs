//! Terminal rendering of the picker.

pub mod theme;
pub mod ui;
