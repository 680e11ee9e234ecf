//! Scroll states, scroll events and wheel gesture detection.
//!
//! Hosts report continuous scroll deltas plus discrete state transitions.
//! Terminals only deliver wheel ticks, so [`WheelGesture`] turns a burst of
//! ticks into a drag and reports the release once the wheel goes quiet.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut wheel = WheelGesture::default();
//!
//! // In event loop:
//! if let Some(delta) = wheel.accumulate(scroll_delta) {
//!     host.drag_by(delta);
//! }
//! // On every frame:
//! if wheel.poll_release() {
//!     host.release();
//! }
//! ```

use std::time::{Duration, Instant};

/// Motion state of the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Not moving
    #[default]
    Idle,
    /// Following the user's finger, wheel or arrow keys
    Dragging,
    /// Moving on its own toward a final position
    Settling,
}

impl ScrollState {
    /// Check if a transition to the target state is expected
    pub fn can_transition_to(&self, target: ScrollState) -> bool {
        use ScrollState::*;
        match (self, target) {
            (Idle, Dragging) => true,
            (Idle, Settling) => true, // Programmatic animated scroll

            (Dragging, Settling) => true, // Release with momentum
            (Dragging, Idle) => true,     // Release without momentum

            (Settling, Idle) => true,
            (Settling, Dragging) => true, // User caught the fling

            (a, b) if *a == b => true,

            _ => false,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        *self != ScrollState::Idle
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScrollState::Idle => "idle",
            ScrollState::Dragging => "dragging",
            ScrollState::Settling => "settling",
        }
    }
}

/// Event delivered to scroll listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The list moved by `delta` pixels along its scroll axis
    Scrolled { delta: i64 },
    /// The list entered a new scroll state
    StateChanged(ScrollState),
}

/// Turns wheel ticks into a drag gesture.
///
/// Deltas are accumulated until they reach `threshold`; a gesture counts as
/// released once no tick arrived for `release_ms`.
#[derive(Debug, Clone)]
pub struct WheelGesture {
    /// Accumulated wheel delta not yet handed out
    accumulated_delta: i64,
    /// Time of last wheel tick
    last_event: Option<Instant>,
    /// Quiet period that ends a gesture, in milliseconds
    release_ms: u64,
    /// Minimum delta before emitting
    threshold: i64,
}

impl Default for WheelGesture {
    fn default() -> Self {
        Self::new(150, 1)
    }
}

impl WheelGesture {
    /// Create a new wheel gesture detector.
    ///
    /// # Arguments
    /// * `release_ms` - Quiet period after which the gesture is released (milliseconds)
    /// * `threshold` - Minimum accumulated delta before a drag step is emitted
    pub fn new(release_ms: u64, threshold: i64) -> Self {
        Self {
            accumulated_delta: 0,
            last_event: None,
            release_ms,
            threshold: threshold.max(1),
        }
    }

    /// Accumulate a wheel delta and return the drag step if one is ready.
    pub fn accumulate(&mut self, delta: i64) -> Option<i64> {
        self.accumulate_at(delta, Instant::now())
    }

    /// Same as [`accumulate`](Self::accumulate) with an explicit clock.
    pub fn accumulate_at(&mut self, delta: i64, now: Instant) -> Option<i64> {
        match self.last_event {
            Some(last) if now.duration_since(last) <= self.release_window() => {
                self.accumulated_delta += delta;
            }
            _ => {
                // New gesture
                self.accumulated_delta = delta;
            }
        }

        self.last_event = Some(now);
        self.take_ready()
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.last_event.is_some()
    }

    /// Report a release exactly once after the wheel went quiet.
    pub fn poll_release(&mut self) -> bool {
        self.poll_release_at(Instant::now())
    }

    /// Same as [`poll_release`](Self::poll_release) with an explicit clock.
    pub fn poll_release_at(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if now.duration_since(last) > self.release_window() => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Drop any pending gesture.
    pub fn reset(&mut self) {
        self.accumulated_delta = 0;
        self.last_event = None;
    }

    fn release_window(&self) -> Duration {
        Duration::from_millis(self.release_ms)
    }

    fn take_ready(&mut self) -> Option<i64> {
        if self.accumulated_delta.abs() >= self.threshold {
            let result = self.accumulated_delta;
            self.accumulated_delta = 0;
            Some(result)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_transitions() {
        use ScrollState::*;
        assert!(Idle.can_transition_to(Dragging));
        assert!(Dragging.can_transition_to(Settling));
        assert!(Settling.can_transition_to(Idle));
        assert!(Dragging.can_transition_to(Idle));
        assert!(Idle.can_transition_to(Idle));
        assert!(!Idle.is_scrolling());
        assert!(Settling.is_scrolling());
    }

    #[test]
    fn test_accumulate_below_threshold() {
        let mut wheel = WheelGesture::new(100, 3);

        assert!(wheel.accumulate(1).is_none());
        assert!(wheel.accumulate(1).is_none());
        assert_eq!(wheel.accumulate(1), Some(3));
    }

    #[test]
    fn test_negative_delta() {
        let mut wheel = WheelGesture::new(100, 2);

        assert!(wheel.accumulate(-1).is_none());
        assert_eq!(wheel.accumulate(-1), Some(-2));
    }

    #[test]
    fn test_release_after_quiet_period() {
        let mut wheel = WheelGesture::new(10, 1);

        assert_eq!(wheel.accumulate(5), Some(5));
        assert!(!wheel.poll_release());
        assert!(wheel.is_active());

        thread::sleep(Duration::from_millis(20));

        assert!(wheel.poll_release());
        // Reported only once
        assert!(!wheel.poll_release());
        assert!(!wheel.is_active());
    }

    #[test]
    fn test_new_gesture_discards_stale_remainder() {
        let mut wheel = WheelGesture::new(50, 3);
        let start = Instant::now();

        assert!(wheel.accumulate_at(2, start).is_none());
        let later = start + Duration::from_millis(200);
        assert!(wheel.accumulate_at(1, later).is_none());
        assert_eq!(wheel.accumulate_at(2, later), Some(3));
    }
}
