//! Mapping between logical indices and linear positions.
//!
//! A logical index identifies a value in the picker's value list. A linear
//! position is a slot in the host list, which in cyclic mode repeats the value
//! list `MAX_POSITION` times over. Positions are `i64` so that recentering math
//! never overflows, even though the host list itself is sized in `i32` range.

use crate::error::{PickerError, Result};

/// A slot in the host's scrollable list.
pub type Position = i64;

/// Item count of the virtual host list in cyclic mode.
pub const MAX_POSITION: Position = i32::MAX as Position;

/// Anchor depth, in cycles, when `MAX_POSITION % value_count` gives none.
const FALLBACK_ANCHOR_CYCLES: Position = 1000;

fn checked_count(value_count: usize) -> Result<Position> {
    if value_count == 0 {
        return Err(PickerError::InvalidArgument(
            "value count must be positive".to_string(),
        ));
    }
    Position::try_from(value_count)
        .map_err(|_| PickerError::InvalidArgument(format!("value count {} too large", value_count)))
}

/// Map a linear position to the logical index it displays.
///
/// Negative positions wrap the same way positive ones do, so the result is
/// always in `0..value_count`.
pub fn to_logical(position: Position, value_count: usize) -> Result<usize> {
    let count = checked_count(value_count)?;
    Ok(position.rem_euclid(count) as usize)
}

/// Number of whole cycles in front of the recentering anchor.
///
/// Normally `(MAX_POSITION % count) / 2`. `MAX_POSITION` is prime, so that is
/// zero for every divisor of `MAX_POSITION - 1` (1, 2, 3, 6, 7, 9, ...), which
/// would leave no room to scroll backward. Those counts get
/// `FALLBACK_ANCHOR_CYCLES`, reduced so that a full cycle still fits after it.
fn anchor_cycles(count: Position) -> Position {
    let cycles = (MAX_POSITION % count) / 2;
    if cycles > 0 {
        return cycles;
    }
    FALLBACK_ANCHOR_CYCLES.min((MAX_POSITION / count - 1) / 2)
}

/// Move a position to the recentering anchor while keeping its logical index.
///
/// The anchor is `value_count * ((MAX_POSITION % value_count) / 2)`, or
/// `value_count * 1000` where that formula puts it at the very start.
pub fn recenter_position(current: Position, value_count: usize) -> Result<Position> {
    let count = checked_count(value_count)?;
    Ok(count * anchor_cycles(count) + current.rem_euclid(count))
}

/// Position used for the first placement of a picker.
pub fn initial_position(initial_index: usize, cyclic: bool, value_count: usize) -> Result<Position> {
    let index = Position::try_from(initial_index)
        .map_err(|_| PickerError::InvalidArgument(format!("index {} too large", initial_index)))?;
    if cyclic {
        recenter_position(index, value_count)
    } else {
        Ok(index)
    }
}

/// The position showing `index` that is closest to `current`.
///
/// Used by cyclic navigation so that moving from the last value to the first
/// scrolls one item forward instead of a whole cycle backward. Never returns
/// a negative position.
pub fn nearest_position_for_index(index: usize, current: Position, value_count: usize) -> Result<Position> {
    let count = checked_count(value_count)?;
    let index = Position::try_from(index)
        .map_err(|_| PickerError::InvalidArgument(format!("index {} too large", index)))?;

    let base = current - current.rem_euclid(count);
    let mut candidate = base + index;
    if candidate - current > count / 2 {
        candidate -= count;
    } else if current - candidate > count / 2 {
        candidate += count;
    }
    if candidate < 0 {
        candidate += count;
    }
    Ok(candidate)
}
