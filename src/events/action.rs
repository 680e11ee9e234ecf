//! Action enum for decoupling input handling from state changes.

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit without choosing
    Quit,
    /// Quit and report the centered value
    Confirm,

    // === Navigation ===
    /// Animate one value forward (+1) or backward (-1)
    Step(i64),
    /// One wheel tick; consecutive ticks form a drag
    Wheel(i64),
    /// Animate to a specific value
    SelectIndex(usize),
    /// Animate to the first value
    First,
    /// Animate to the last value
    Last,

    // === Configuration ===
    ToggleOrientation,
    ToggleCyclic,

    /// No action needed
    None,
}
