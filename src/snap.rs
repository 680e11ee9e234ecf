//! Snap and recenter decisions.
//!
//! The host list handles fling physics and snapping to the nearest item on
//! its own. This controller only decides two things: where the very first
//! placement goes, and (in cyclic mode) where to jump once motion has stopped
//! so the position never drifts toward the ends of the virtual list.

use crate::error::{PickerError, Result};
use crate::index::{self, Position};
use crate::log;
use crate::scroll::ScrollState;

/// Items an animated first placement travels at most.
const INITIAL_ANIMATION_ITEMS: Position = 5;

/// Command for the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapCommand {
    /// Move instantly, without scroll events or animation
    Jump(Position),
    /// Animate to the position through the host's own driver
    Animate(Position),
}

impl SnapCommand {
    pub fn target(&self) -> Position {
        match self {
            SnapCommand::Jump(position) | SnapCommand::Animate(position) => *position,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapController {
    state: ScrollState,
}

impl SnapController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Record a scroll state change. Returns `true` when motion just stopped.
    pub fn transition(&mut self, new_state: ScrollState) -> bool {
        let previous = std::mem::replace(&mut self.state, new_state);
        if !previous.can_transition_to(new_state) {
            log::log_warn(&format!(
                "unexpected scroll state transition {} -> {}",
                previous.label(),
                new_state.label()
            ));
        }
        previous != ScrollState::Idle && new_state == ScrollState::Idle
    }

    /// Correction to apply after motion stopped at `centered`.
    ///
    /// Non-cyclic pickers rely on the host's own snap, so there is nothing to
    /// do. Cyclic pickers jump back to the recentering anchor unless they are
    /// already there.
    pub fn settle_correction(&self, centered: Position, cyclic: bool, value_count: usize) -> Result<Option<SnapCommand>> {
        if value_count == 0 {
            return Err(PickerError::EmptyValueSet);
        }
        if self.state.is_scrolling() {
            // Never move the list under the user's finger.
            return Ok(None);
        }
        if !cyclic {
            return Ok(None);
        }

        let target = index::recenter_position(centered, value_count)?;
        if target == centered {
            return Ok(None);
        }
        Ok(Some(SnapCommand::Jump(target)))
    }

    /// Commands for the first placement of a freshly attached picker.
    ///
    /// An animated placement first jumps to a few items before the target
    /// and animates only that last stretch, since the cyclic anchor can be
    /// millions of items away from the start of the list.
    pub fn initial_placement(
        &self,
        initial_index: usize,
        cyclic: bool,
        value_count: usize,
        animate: bool,
    ) -> Result<Vec<SnapCommand>> {
        if value_count == 0 {
            return Err(PickerError::EmptyValueSet);
        }
        if initial_index >= value_count {
            return Err(PickerError::IndexOutOfRange {
                index: initial_index as i64,
                count: value_count,
            });
        }

        let position = index::initial_position(initial_index, cyclic, value_count)?;
        if !animate {
            return Ok(vec![SnapCommand::Jump(position)]);
        }
        let lead_in = position - position.min(INITIAL_ANIMATION_ITEMS);
        Ok(vec![SnapCommand::Jump(lead_in), SnapCommand::Animate(position)])
    }
}
