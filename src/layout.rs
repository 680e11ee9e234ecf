//! Center alignment math.
//!
//! The host list is padded symmetrically along its scroll axis so that the
//! first and last item can sit in the middle of the viewport. With that padding
//! in place, scroll offset `p * item_extent` centers position `p`.

use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};
use crate::index::Position;

/// Alpha of the centered item's neighbours at one item of distance.
const NEAR_ALPHA: f32 = 0.66;
/// Lowest alpha handed to renderers, so far items stay faintly visible.
pub const MIN_FOCUS_ALPHA: f32 = 0.1;

/// Scroll axis of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Raw value used by host list toolkits.
    pub fn as_raw(self) -> i32 {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl TryFrom<i32> for Orientation {
    type Error = PickerError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Orientation::Horizontal),
            1 => Ok(Orientation::Vertical),
            other => Err(PickerError::OrientationConflict(other)),
        }
    }
}

/// Derived layout state pushed to the host after every (re)configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub orientation: Orientation,
    /// Viewport size along the scroll axis
    pub viewport_extent: u32,
    /// Uniform item size along the scroll axis
    pub item_extent: u32,
    /// Padding applied at both ends of the scroll axis
    pub edge_padding: u32,
    /// Number of slots in the host list
    pub item_count: Position,
}

impl LayoutSnapshot {
    pub fn new(orientation: Orientation, viewport_extent: u32, item_extent: u32, item_count: Position) -> Self {
        Self {
            orientation,
            viewport_extent,
            item_extent,
            edge_padding: compute_edge_padding(viewport_extent, item_extent),
            item_count,
        }
    }

    /// Scroll offset at which `position` is centered.
    pub fn offset_for(&self, position: Position) -> i64 {
        position * i64::from(self.item_extent)
    }

    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> i64 {
        if self.item_count <= 0 {
            return 0;
        }
        (self.item_count - 1) * i64::from(self.item_extent)
    }

    /// Start of `position` along the scroll axis, relative to the viewport.
    pub fn item_start(&self, position: Position, scroll_offset: i64) -> i64 {
        i64::from(self.edge_padding) + self.offset_for(position) - scroll_offset
    }
}

/// Padding that lets an item at either end reach the viewport center.
///
/// Zero when the item is larger than the viewport.
pub fn compute_edge_padding(viewport_extent: u32, item_extent: u32) -> u32 {
    (viewport_extent / 2).saturating_sub(item_extent / 2)
}

/// Position nearest to the viewport center for a given scroll offset.
pub fn find_centered_position(scroll_offset: i64, item_extent: u32) -> Result<Position> {
    if item_extent == 0 {
        return Err(PickerError::InvalidArgument(
            "item extent must be positive".to_string(),
        ));
    }
    let extent = i64::from(item_extent);
    Ok((scroll_offset + extent / 2).div_euclid(extent))
}

/// Signed distance in pixels between `position` and the centered position.
pub fn distance_to_center(position: Position, centered: Position, item_extent: u32) -> i64 {
    (position - centered) * i64::from(item_extent)
}

/// Signed distance in pixels between `position` and the exact viewport center.
///
/// Unlike [`distance_to_center`] this follows the scroll offset continuously,
/// which is what a fade effect wants mid-scroll.
pub fn offset_distance(position: Position, scroll_offset: i64, item_extent: u32) -> i64 {
    position * i64::from(item_extent) - scroll_offset
}

/// Emphasis for an item at `distance` pixels from center.
///
/// Full strength at the center, falling off quickly within one item and then
/// slowly toward the viewport edge, never below [`MIN_FOCUS_ALPHA`].
pub fn focus_alpha(distance: i64, item_extent: u32, viewport_extent: u32) -> f32 {
    let distance = distance.unsigned_abs() as f32;
    let item = item_extent.max(1) as f32;
    let viewport = viewport_extent.max(1) as f32;

    if distance < item {
        (1.0 - distance / item + NEAR_ALPHA).min(1.0)
    } else {
        (NEAR_ALPHA - distance / viewport).clamp(MIN_FOCUS_ALPHA, NEAR_ALPHA)
    }
}
