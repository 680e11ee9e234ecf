//! Selection tracking.
//!
//! Converts the stream of centered positions into discrete "value selected"
//! notifications. Only logical indices are compared, so a recentering jump
//! that changes the position but not the index never reports anything.

use crate::error::Result;
use crate::index::{self, Position};

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    last_reported: Option<usize>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index reported by the last call to [`observe`](Self::observe) that changed it.
    pub fn last_reported(&self) -> Option<usize> {
        self.last_reported
    }

    /// Feed the currently centered position.
    ///
    /// Returns `Some(index)` when the logical index differs from the last
    /// reported one, `None` otherwise.
    pub fn observe(&mut self, centered: Position, value_count: usize) -> Result<Option<usize>> {
        let index = index::to_logical(centered, value_count)?;
        if self.last_reported == Some(index) {
            return Ok(None);
        }
        self.last_reported = Some(index);
        Ok(Some(index))
    }

    /// Forget the last reported index (new value list).
    pub fn reset(&mut self) {
        self.last_reported = None;
    }
}
