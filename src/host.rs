//! The host list boundary.
//!
//! The picker core never draws or measures anything itself. A host adapter
//! wraps a concrete scrollable list (a toolkit widget, a terminal region) and
//! implements [`ScrollHost`]: it answers layout queries, carries out position
//! commands, and feeds scroll events back to the picker.
//!
//! [`SimulatedHost`] is an in-process list with edge padding, snap-to-item on
//! release and frame-stepped settling. The terminal front end and the tests
//! both drive the picker through it.

use std::collections::VecDeque;

use crate::index::Position;
use crate::layout::{LayoutSnapshot, Orientation};
use crate::scroll::ScrollState;

/// Raw event produced by a host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The list moved by `delta`, ending at absolute `offset`
    Scrolled { delta: i64, offset: i64 },
    ScrollStateChanged(ScrollState),
}

/// Capabilities the picker needs from a scrollable list.
pub trait ScrollHost {
    /// Viewport size along the given axis
    fn viewport_extent(&self, orientation: Orientation) -> u32;

    /// Current scroll offset along the scroll axis. With the picker's edge
    /// padding applied, offset `p * item_extent` centers position `p`.
    fn scroll_offset(&self) -> i64;

    /// Scroll state right now, which may be ahead of the events still queued
    fn scroll_state(&self) -> ScrollState;

    /// First item fully visible inside the padded region, if the host tracks it
    fn first_fully_visible_position(&self) -> Option<Position> {
        None
    }

    /// Apply padding, item count and item size
    fn apply_layout(&mut self, layout: &LayoutSnapshot);

    /// Move instantly to `position`
    fn jump_to_position(&mut self, position: Position);

    /// Start an animated scroll to `position`
    fn animate_to_position(&mut self, position: Position);

    /// Next queued event for hosts that buffer events instead of calling the
    /// picker directly
    fn poll_event(&mut self) -> Option<HostEvent> {
        None
    }
}

/// Default settling speed in pixels per frame.
const DEFAULT_FRAME_STEP: i64 = 8;
/// Upper bound on frames `settle` will run.
const MAX_SETTLE_FRAMES: usize = 100_000;

/// In-process host list.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    width: u32,
    height: u32,
    layout: Option<LayoutSnapshot>,
    offset: i64,
    state: ScrollState,
    target: Option<i64>,
    frame_step: i64,
    events: VecDeque<HostEvent>,
}

impl SimulatedHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout: None,
            offset: 0,
            state: ScrollState::Idle,
            target: None,
            frame_step: DEFAULT_FRAME_STEP,
            events: VecDeque::new(),
        }
    }

    /// Set the settling speed (builder pattern)
    pub fn with_frame_step(mut self, frame_step: i64) -> Self {
        self.frame_step = frame_step.max(1);
        self
    }

    /// Change the viewport size. The picker must be reconfigured afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn layout(&self) -> Option<&LayoutSnapshot> {
        self.layout.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Number of events not yet consumed by the picker.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Move the list by `delta` pixels as a user drag. Returns the applied delta.
    pub fn drag_by(&mut self, delta: i64) -> i64 {
        self.target = None;
        self.set_state(ScrollState::Dragging);
        self.move_by(delta)
    }

    /// End a drag without momentum; the list snaps to the nearest item.
    pub fn release(&mut self) {
        self.fling(0);
    }

    /// End a drag with momentum carrying the list `items` further.
    pub fn fling(&mut self, items: i64) {
        let Some(layout) = self.layout else {
            self.set_state(ScrollState::Idle);
            return;
        };
        if layout.item_extent == 0 {
            self.set_state(ScrollState::Idle);
            return;
        }

        let extent = i64::from(layout.item_extent);
        let nearest = (self.offset + extent / 2).div_euclid(extent);
        let target = self.clamp_offset((nearest + items) * extent);
        self.start_settling(target);
    }

    /// Advance a running animation by one frame. Returns `true` while still moving.
    pub fn advance_frame(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let remaining = target - self.offset;
        let step = remaining.clamp(-self.frame_step, self.frame_step);
        self.move_by(step);

        if self.offset == target {
            self.target = None;
            self.set_state(ScrollState::Idle);
            return false;
        }
        true
    }

    /// Run frames until the list is at rest.
    pub fn settle(&mut self) {
        let mut frames = 0;
        while self.advance_frame() && frames < MAX_SETTLE_FRAMES {
            frames += 1;
        }
    }

    fn start_settling(&mut self, target: i64) {
        if target == self.offset {
            self.target = None;
            self.set_state(ScrollState::Idle);
        } else {
            self.target = Some(target);
            self.set_state(ScrollState::Settling);
        }
    }

    fn move_by(&mut self, delta: i64) -> i64 {
        let next = self.clamp_offset(self.offset + delta);
        let applied = next - self.offset;
        self.offset = next;
        if applied != 0 {
            self.events.push_back(HostEvent::Scrolled {
                delta: applied,
                offset: self.offset,
            });
        }
        applied
    }

    fn set_state(&mut self, state: ScrollState) {
        if self.state != state {
            self.state = state;
            self.events.push_back(HostEvent::ScrollStateChanged(state));
        }
    }

    fn clamp_offset(&self, offset: i64) -> i64 {
        let max = self.layout.map(|layout| layout.max_offset()).unwrap_or(0);
        offset.clamp(0, max)
    }

    fn offset_for(&self, position: Position) -> i64 {
        self.layout
            .map(|layout| self.clamp_offset(layout.offset_for(position)))
            .unwrap_or(0)
    }
}

impl ScrollHost for SimulatedHost {
    fn viewport_extent(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    fn scroll_offset(&self) -> i64 {
        self.offset
    }

    fn scroll_state(&self) -> ScrollState {
        self.state
    }

    fn first_fully_visible_position(&self) -> Option<Position> {
        let layout = self.layout?;
        if layout.item_extent == 0 || layout.item_count <= 0 {
            return None;
        }

        // Visible window with the edge padding excluded.
        let extent = i64::from(layout.item_extent);
        let inner = i64::from(layout.viewport_extent) - 2 * i64::from(layout.edge_padding);
        let first = (self.offset + extent - 1).div_euclid(extent);
        let fits = (first + 1) * extent <= self.offset + inner;
        (fits && first < layout.item_count).then_some(first)
    }

    fn apply_layout(&mut self, layout: &LayoutSnapshot) {
        self.layout = Some(*layout);
        self.offset = self.clamp_offset(self.offset);
        if let Some(target) = self.target {
            self.target = Some(self.clamp_offset(target));
        }
    }

    fn jump_to_position(&mut self, position: Position) {
        self.target = None;
        self.offset = self.offset_for(position);
        self.set_state(ScrollState::Idle);
    }

    fn animate_to_position(&mut self, position: Position) {
        let target = self.offset_for(position);
        self.start_settling(target);
    }

    fn poll_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_items(count: i64) -> SimulatedHost {
        let mut host = SimulatedHost::new(100, 480);
        host.apply_layout(&LayoutSnapshot::new(Orientation::Vertical, 480, 48, count));
        host
    }

    fn drain(host: &mut SimulatedHost) -> Vec<HostEvent> {
        std::iter::from_fn(|| host.poll_event()).collect()
    }

    #[test]
    fn test_viewport_follows_orientation() {
        let host = SimulatedHost::new(320, 480);
        assert_eq!(host.viewport_extent(Orientation::Horizontal), 320);
        assert_eq!(host.viewport_extent(Orientation::Vertical), 480);
    }

    #[test]
    fn test_drag_and_release_snaps_to_nearest_item() {
        let mut host = host_with_items(10);
        assert_eq!(host.drag_by(70), 70);
        host.release();
        assert_eq!(host.scroll_state(), ScrollState::Settling);
        host.settle();

        assert_eq!(host.scroll_offset(), 48);
        assert_eq!(host.scroll_state(), ScrollState::Idle);

        let events = drain(&mut host);
        assert_eq!(events.first(), Some(&HostEvent::ScrollStateChanged(ScrollState::Dragging)));
        assert_eq!(events.get(1), Some(&HostEvent::Scrolled { delta: 70, offset: 70 }));
        assert_eq!(events.get(2), Some(&HostEvent::ScrollStateChanged(ScrollState::Settling)));
        assert_eq!(events.last(), Some(&HostEvent::ScrollStateChanged(ScrollState::Idle)));
        let settled: i64 = events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Scrolled { delta, .. } => Some(*delta),
                _ => None,
            })
            .sum();
        assert_eq!(settled, 48);
    }

    #[test]
    fn test_aligned_release_goes_straight_to_idle() {
        let mut host = host_with_items(10);
        host.drag_by(96);
        host.release();
        assert_eq!(host.scroll_state(), ScrollState::Idle);
        assert!(!host.is_animating());
    }

    #[test]
    fn test_offsets_are_clamped_to_list() {
        let mut host = host_with_items(3);
        assert_eq!(host.drag_by(-20), 0);
        assert_eq!(host.drag_by(1_000), 96);
        host.fling(5);
        host.settle();
        assert_eq!(host.scroll_offset(), 96);
    }

    #[test]
    fn test_jump_is_silent_and_stops_motion() {
        let mut host = host_with_items(10);
        host.animate_to_position(5);
        assert!(host.is_animating());
        drain(&mut host);

        host.jump_to_position(2);
        assert_eq!(host.scroll_offset(), 96);
        assert_eq!(
            drain(&mut host),
            vec![HostEvent::ScrollStateChanged(ScrollState::Idle)]
        );

        host.jump_to_position(3);
        assert!(drain(&mut host).is_empty());
    }

    #[test]
    fn test_first_fully_visible_position() {
        let mut host = host_with_items(10);
        host.jump_to_position(4);
        assert_eq!(host.first_fully_visible_position(), Some(4));
        host.drag_by(10);
        assert_eq!(host.first_fully_visible_position(), None);
    }
}
