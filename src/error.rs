//! Domain error types for snappick
//!
//! A single `PickerError` covers every failure the picker core can report:
//! - `InvalidArgument` for index math fed a non-positive count or extent
//! - `EmptyValueSet` for the degraded "nothing to pick" state
//! - `IndexOutOfRange` for navigation targets outside the value list
//! - `OrientationConflict` for raw orientation values outside the enum

use thiserror::Error;

/// Top-level error type for the picker core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Picker has no values")]
    EmptyValueSet,

    #[error("Index {index} out of range for {count} values")]
    IndexOutOfRange { index: i64, count: usize },

    #[error("Orientation value must be 0 (horizontal) or 1 (vertical), got {0}")]
    OrientationConflict(i32),
}

/// Result type alias for PickerError
pub type Result<T> = std::result::Result<T, PickerError>;
