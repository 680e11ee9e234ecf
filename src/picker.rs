//! The value picker.
//!
//! [`ValuePicker`] owns a value list and a host list, and turns the host's raw
//! scroll traffic into picker semantics:
//!
//! - every scroll delta is republished to scroll listeners, then the centered
//!   item is recomputed and selection listeners hear about index changes
//! - every state change is republished, and when motion stops a cyclic picker
//!   jumps back to its recentering anchor without reporting a new selection,
//!   provided the host is still at rest by then
//!
//! Configuration setters only mark the layout stale; [`ValuePicker::reconfigure`]
//! recomputes padding and item count, pushes them to the host, and puts the
//! current index back in the center.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};
use crate::host::{HostEvent, ScrollHost};
use crate::index::{self, MAX_POSITION, Position};
use crate::layout::{self, LayoutSnapshot, Orientation};
use crate::listeners::{ListenerId, Subscribers};
use crate::log;
use crate::scroll::{ScrollEvent, ScrollState};
use crate::selection::SelectionTracker;
use crate::snap::{SnapCommand, SnapController};

/// Default item size along the scroll axis.
pub const DEFAULT_ITEM_EXTENT: u32 = 48;
pub const DEFAULT_CYCLIC_ENABLED: bool = false;

/// Event delivered to selection listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSelected<T> {
    pub index: usize,
    pub value: T,
}

/// Construction-time settings of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub orientation: Orientation,
    pub cyclic: bool,
    /// Index centered by [`ValuePicker::attach`]
    pub initial_index: usize,
    pub item_extent: u32,
    /// Animate the first placement instead of jumping
    pub animate_initial: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            cyclic: DEFAULT_CYCLIC_ENABLED,
            initial_index: 0,
            item_extent: DEFAULT_ITEM_EXTENT,
            animate_initial: false,
        }
    }
}

/// Selected value, as handed to a host's state-restoration mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPickerState<T> {
    pub value: T,
}

/// An item currently inside the viewport, for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleItem<'a, T> {
    pub position: Position,
    pub index: usize,
    pub value: &'a T,
    /// Start along the scroll axis, relative to the viewport
    pub start: i64,
    /// Signed distance from the viewport center in pixels
    pub distance: i64,
    /// Emphasis in `MIN_FOCUS_ALPHA..=1.0`
    pub alpha: f32,
}

#[derive(Debug)]
pub struct ValuePicker<T: 'static, H> {
    values: Rc<[T]>,
    orientation: Orientation,
    cyclic: bool,
    initial_index: usize,
    animate_initial: bool,
    item_extent: u32,
    layout: Option<LayoutSnapshot>,
    needs_layout: bool,
    attached: bool,
    tracker: SelectionTracker,
    snap: SnapController,
    host: H,
    scroll_listeners: Subscribers<ScrollEvent>,
    selection_listeners: Subscribers<ValueSelected<T>>,
}

impl<T, H> ValuePicker<T, H>
where
    T: Clone + 'static,
    H: ScrollHost,
{
    pub fn new(host: H, options: PickerOptions) -> Self {
        Self {
            values: Rc::from(Vec::new()),
            orientation: options.orientation,
            cyclic: options.cyclic,
            initial_index: options.initial_index,
            animate_initial: options.animate_initial,
            item_extent: options.item_extent.max(1),
            layout: None,
            needs_layout: true,
            attached: false,
            tracker: SelectionTracker::new(),
            snap: SnapController::new(),
            host,
            scroll_listeners: Subscribers::new(),
            selection_listeners: Subscribers::new(),
        }
    }

    /// Create a picker that already holds `values`.
    pub fn with_values(host: H, options: PickerOptions, values: impl Into<Vec<T>>) -> Self {
        let mut picker = Self::new(host, options);
        picker.values = Rc::from(values.into());
        picker
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn item_extent(&self) -> u32 {
        self.item_extent
    }

    pub fn layout(&self) -> Option<&LayoutSnapshot> {
        self.layout.as_ref()
    }

    /// Whether a setter changed something the host has not been told about yet.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct access to the host. Events the host queues meanwhile are only
    /// seen after [`process_pending_events`](Self::process_pending_events);
    /// [`with_host`](Self::with_host) does both.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Run `f` against the host, then consume the events it produced.
    pub fn with_host<R>(&mut self, f: impl FnOnce(&mut H) -> R) -> R {
        let result = f(&mut self.host);
        self.process_pending_events();
        result
    }

    // === Queries ===

    /// Index of the value at the center, as last reported to listeners.
    pub fn current_index(&self) -> Option<usize> {
        self.tracker.last_reported()
    }

    pub fn current_value(&self) -> Option<&T> {
        self.current_index().and_then(|index| self.values.get(index))
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.snap.state()
    }

    pub fn is_scrolling(&self) -> bool {
        self.snap.state().is_scrolling()
    }

    /// Position nearest the viewport center, from the host's scroll offset.
    pub fn centered_position(&self) -> Option<Position> {
        let layout = self.layout?;
        layout::find_centered_position(self.host.scroll_offset(), layout.item_extent).ok()
    }

    // === Configuration ===

    /// Replace the value list.
    ///
    /// Selection restarts at index 0. An empty list puts the picker in a
    /// stable degraded state until a non-empty list arrives.
    pub fn set_values(&mut self, values: impl Into<Vec<T>>) {
        self.values = Rc::from(values.into());
        self.tracker.reset();
        self.needs_layout = true;

        if self.attached {
            self.apply_layout();
            self.reposition(0);
        }
    }

    /// Change the scroll axis. Takes effect on the next [`reconfigure`](Self::reconfigure).
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.needs_layout = true;
        }
    }

    /// Change the scroll axis from a toolkit's raw orientation value.
    ///
    /// Fails with `OrientationConflict` for anything but 0 or 1, leaving the
    /// orientation unchanged.
    pub fn set_orientation_raw(&mut self, raw: i32) -> Result<()> {
        let orientation = Orientation::try_from(raw)?;
        self.set_orientation(orientation);
        Ok(())
    }

    /// Toggle wrap-around scrolling. Takes effect on the next [`reconfigure`](Self::reconfigure).
    pub fn set_cyclic(&mut self, cyclic: bool) {
        if self.cyclic != cyclic {
            self.cyclic = cyclic;
            self.needs_layout = true;
        }
    }

    /// Set the uniform item size along the scroll axis.
    pub fn set_item_extent(&mut self, item_extent: u32) -> Result<()> {
        if item_extent == 0 {
            return Err(PickerError::InvalidArgument(
                "item extent must be positive".to_string(),
            ));
        }
        if self.item_extent != item_extent {
            self.item_extent = item_extent;
            self.needs_layout = true;
        }
        Ok(())
    }

    /// Set the item size from per-item measurements; the largest one wins so
    /// that every item can reach the center.
    pub fn set_item_extents(&mut self, extents: &[u32]) -> Result<()> {
        let max = extents.iter().copied().max().ok_or_else(|| {
            PickerError::InvalidArgument("no item measurements".to_string())
        })?;
        self.set_item_extent(max)
    }

    /// Recompute layout, push it to the host and re-center the current index.
    pub fn reconfigure(&mut self) -> LayoutSnapshot {
        let index = self.current_index().unwrap_or(self.initial_index);
        let layout = self.apply_layout();
        if !self.is_empty() {
            self.reposition(index.min(self.value_count() - 1));
        }
        layout
    }

    /// First layout and placement of the picker.
    ///
    /// Fails with `IndexOutOfRange` if the initial index does not fit the
    /// value list; nothing is changed in that case. An empty value list
    /// attaches in the degraded state.
    pub fn attach(&mut self) -> Result<()> {
        let commands = match self.snap.initial_placement(
            self.initial_index,
            self.cyclic,
            self.value_count(),
            self.animate_initial,
        ) {
            Ok(commands) => Some(commands),
            Err(PickerError::EmptyValueSet) => None,
            Err(err) => return Err(err),
        };

        self.attached = true;
        self.apply_layout();
        match commands {
            Some(commands) => {
                for command in commands {
                    self.execute(command);
                }
            }
            None => {
                log::log_warn("attached with an empty value set");
                self.host.jump_to_position(0);
                self.process_pending_events();
            }
        }
        Ok(())
    }

    // === Navigation ===

    /// Bring `index` to the center.
    ///
    /// Cyclic pickers pick the copy of `index` nearest to the current
    /// position. Before [`attach`](Self::attach) this only changes the
    /// initial index.
    pub fn scroll_to_index(&mut self, index: i64, animated: bool) -> Result<()> {
        let count = self.value_count();
        let valid = usize::try_from(index).ok().filter(|index| *index < count);
        let Some(index) = valid else {
            return Err(PickerError::IndexOutOfRange { index, count });
        };

        if !self.attached {
            self.initial_index = index;
            return Ok(());
        }
        if self.needs_layout {
            self.reconfigure();
        }

        let target = self.target_position(index)?;
        let command = if animated {
            SnapCommand::Animate(target)
        } else {
            SnapCommand::Jump(target)
        };
        self.execute(command);
        Ok(())
    }

    // === Listeners ===

    pub fn add_scroll_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        self.scroll_listeners.add(listener)
    }

    pub fn remove_scroll_listener(&mut self, id: ListenerId) -> bool {
        self.scroll_listeners.remove(id)
    }

    pub fn add_selection_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ValueSelected<T>) + 'static,
    {
        self.selection_listeners.add(listener)
    }

    pub fn remove_selection_listener(&mut self, id: ListenerId) -> bool {
        self.selection_listeners.remove(id)
    }

    /// Shared handle to the scroll listeners, for listeners that unregister
    /// themselves during delivery.
    pub fn scroll_listeners(&self) -> Subscribers<ScrollEvent> {
        self.scroll_listeners.clone()
    }

    /// Shared handle to the selection listeners.
    pub fn selection_listeners(&self) -> Subscribers<ValueSelected<T>> {
        self.selection_listeners.clone()
    }

    // === Host events ===

    /// Consume every event the host has queued.
    pub fn process_pending_events(&mut self) {
        while let Some(event) = self.host.poll_event() {
            self.handle_host_event(event);
        }
    }

    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Scrolled { delta, offset } => self.on_scrolled(delta, offset),
            HostEvent::ScrollStateChanged(state) => self.on_scroll_state_changed(state),
        }
    }

    /// The host list moved by `delta` pixels and came to `offset`.
    ///
    /// Selection follows `offset`, not the host's current offset, so updates
    /// queued together are each reported in order.
    pub fn on_scrolled(&mut self, delta: i64, offset: i64) {
        self.scroll_listeners.dispatch(&ScrollEvent::Scrolled { delta });
        self.sync_selection_at(offset);
    }

    /// The host list changed scroll state.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        let stopped = self.snap.transition(state);
        self.scroll_listeners.dispatch(&ScrollEvent::StateChanged(state));
        if stopped {
            self.correct_after_settle();
        }
    }

    // === Rendering support ===

    /// Items intersecting the viewport, nearest-first order not guaranteed.
    pub fn visible_items(&self) -> Vec<VisibleItem<'_, T>> {
        let Some(layout) = self.layout else {
            return vec![];
        };
        let Some(centered) = self.centered_position() else {
            return vec![];
        };
        if self.is_empty() {
            return vec![];
        }

        let offset = self.host.scroll_offset();
        let extent = i64::from(layout.item_extent);
        let reach = i64::from(layout.viewport_extent) / (2 * extent) + 1;
        let viewport = i64::from(layout.viewport_extent);

        ((centered - reach)..=(centered + reach))
            .filter(|position| (0..layout.item_count).contains(position))
            .filter_map(|position| {
                let start = layout.item_start(position, offset);
                if start + extent <= 0 || start >= viewport {
                    return None;
                }
                let index = index::to_logical(position, self.value_count()).ok()?;
                let distance = layout::offset_distance(position, offset, layout.item_extent);
                Some(VisibleItem {
                    position,
                    index,
                    value: &self.values[index],
                    start,
                    distance,
                    alpha: layout::focus_alpha(distance, layout.item_extent, layout.viewport_extent),
                })
            })
            .collect()
    }

    // === Internals ===

    fn apply_layout(&mut self) -> LayoutSnapshot {
        let item_count = if self.is_empty() {
            0
        } else if self.cyclic {
            MAX_POSITION
        } else {
            self.value_count() as Position
        };
        let viewport = self.host.viewport_extent(self.orientation);
        let layout = LayoutSnapshot::new(self.orientation, viewport, self.item_extent, item_count);

        self.host.apply_layout(&layout);
        self.layout = Some(layout);
        self.needs_layout = false;
        log::log(&format!(
            "layout: {:?} viewport={} item={} padding={} count={}",
            layout.orientation, layout.viewport_extent, layout.item_extent, layout.edge_padding, layout.item_count
        ));
        layout
    }

    fn reposition(&mut self, index: usize) {
        match index::initial_position(index, self.cyclic, self.value_count()) {
            Ok(position) => self.execute(SnapCommand::Jump(position)),
            Err(err) => log::log_warn(&format!("cannot reposition to {}: {}", index, err)),
        }
    }

    fn target_position(&self, index: usize) -> Result<Position> {
        if !self.cyclic {
            return Ok(index as Position);
        }
        match self.centered_position() {
            Some(current) => index::nearest_position_for_index(index, current, self.value_count()),
            None => index::initial_position(index, true, self.value_count()),
        }
    }

    fn execute(&mut self, command: SnapCommand) {
        match command {
            SnapCommand::Jump(position) => self.host.jump_to_position(position),
            SnapCommand::Animate(position) => self.host.animate_to_position(position),
        }
        self.process_pending_events();
        self.sync_selection();
    }

    fn correct_after_settle(&mut self) {
        if self.host.scroll_state().is_scrolling() {
            // A newer gesture is already under way; its own settle corrects.
            log::log_event("settle correction skipped, host is moving again");
            return;
        }

        let anchor = self.host.first_fully_visible_position();
        let Some(centered) = anchor.or_else(|| self.centered_position()) else {
            return;
        };

        match self.snap.settle_correction(centered, self.cyclic, self.value_count()) {
            Ok(Some(command)) => {
                log::log_event(&format!("recenter {} -> {}", centered, command.target()));
                self.execute(command);
            }
            Ok(None) => self.sync_selection(),
            Err(PickerError::EmptyValueSet) => {
                log::log_warn("settled with an empty value set");
            }
            Err(err) => log::log_warn(&format!("settle correction failed: {}", err)),
        }
    }

    fn sync_selection(&mut self) {
        self.sync_selection_at(self.host.scroll_offset());
    }

    fn sync_selection_at(&mut self, offset: i64) {
        if self.is_empty() {
            return;
        }
        let Some(layout) = self.layout else {
            return;
        };
        let Ok(centered) = layout::find_centered_position(offset, layout.item_extent) else {
            return;
        };

        match self.tracker.observe(centered, self.value_count()) {
            Ok(Some(index)) => {
                let event = ValueSelected {
                    index,
                    value: self.values[index].clone(),
                };
                log::log_event(&format!("selected index {}", index));
                self.selection_listeners.dispatch(&event);
            }
            Ok(None) => {}
            Err(err) => log::log_warn(&format!("selection update failed: {}", err)),
        }
    }
}

impl<T, H> ValuePicker<T, H>
where
    T: Clone + PartialEq + 'static,
    H: ScrollHost,
{
    /// Snapshot of the selected value for state restoration.
    pub fn save_state(&self) -> Option<SavedPickerState<T>> {
        self.current_value().map(|value| SavedPickerState {
            value: value.clone(),
        })
    }

    /// Select a previously saved value if the current list still contains it.
    ///
    /// Returns `false` and leaves the picker untouched otherwise.
    pub fn restore_state(&mut self, state: &SavedPickerState<T>) -> Result<bool> {
        let Some(index) = self.values.iter().position(|value| *value == state.value) else {
            return Ok(false);
        };
        self.scroll_to_index(index as i64, false)?;
        Ok(true)
    }
}
