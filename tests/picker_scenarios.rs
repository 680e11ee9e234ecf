//! End-to-end picker behavior against the simulated host list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use snappick::{
    ListenerId, MAX_POSITION, Orientation, PickerError, PickerOptions, SavedPickerState, ScrollEvent,
    ScrollHost, ScrollState, SimulatedHost, ValuePicker, ValueSelected,
};

const ITEM: i64 = 48;

fn hours(cyclic: bool) -> ValuePicker<u32, SimulatedHost> {
    let options = PickerOptions {
        cyclic,
        item_extent: ITEM as u32,
        ..Default::default()
    };
    ValuePicker::with_values(SimulatedHost::new(320, 480), options, (0..24).collect::<Vec<u32>>())
}

fn letters() -> ValuePicker<&'static str, SimulatedHost> {
    ValuePicker::with_values(SimulatedHost::new(320, 480), PickerOptions::default(), vec!["A", "B", "C"])
}

fn record_selections<T: Clone + 'static>(picker: &mut ValuePicker<T, SimulatedHost>) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();
    picker.add_selection_listener(move |event: &ValueSelected<T>| sink.borrow_mut().push(event.index));
    seen
}

fn record_scroll_events<T: Clone + 'static>(picker: &mut ValuePicker<T, SimulatedHost>) -> Rc<RefCell<Vec<ScrollEvent>>> {
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();
    picker.add_scroll_listener(move |event| sink.borrow_mut().push(*event));
    seen
}

#[test]
fn cyclic_attach_starts_at_anchor() {
    let mut picker = hours(true);
    let seen = record_selections(&mut picker);
    picker.attach().unwrap();

    // 2147483647 % 24 == 7, so the anchor cycle starts at 24 * 3.
    assert_eq!(picker.centered_position(), Some(72));
    assert_eq!(picker.current_index(), Some(0));
    assert_eq!(*seen.borrow(), vec![0]);

    let layout = picker.layout().unwrap();
    assert_eq!(layout.edge_padding, 216);
    assert_eq!(layout.item_count, MAX_POSITION);
}

#[test]
fn full_cycle_drag_lands_on_same_value_without_reporting() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);

    picker.with_host(|host| {
        host.drag_by(24 * ITEM);
        host.release();
        host.settle();
    });

    assert_eq!(picker.current_index(), Some(0));
    assert!(seen.borrow().is_empty());
    // Recentered back onto the anchor cycle.
    assert_eq!(picker.centered_position(), Some(72));
    assert_eq!(picker.scroll_state(), ScrollState::Idle);
}

#[test]
fn stepwise_drag_reports_every_index_once() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);
    let events = record_scroll_events(&mut picker);

    // Picker sees each step before the next one starts.
    for _ in 0..24 {
        picker.with_host(|host| host.drag_by(ITEM));
    }
    let scrolled_while_dragging = events.borrow().len();

    picker.with_host(|host| {
        host.release();
        host.settle();
    });

    let expected: Vec<usize> = (1..24).chain(std::iter::once(0)).collect();
    assert_eq!(*seen.borrow(), expected);
    assert!(seen.borrow().windows(2).all(|pair| pair[0] != pair[1]));

    // Release reports Idle; the recenter jump itself adds no scroll delta.
    let events = events.borrow();
    assert_eq!(&events[scrolled_while_dragging..], &[ScrollEvent::StateChanged(ScrollState::Idle)]);
    assert_eq!(picker.centered_position(), Some(72));
}

#[test]
fn drag_backwards_from_anchor_wraps() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);

    picker.with_host(|host| host.drag_by(-ITEM));
    picker.with_host(|host| {
        host.drag_by(-ITEM);
        host.release();
        host.settle();
    });

    assert_eq!(*seen.borrow(), vec![23, 22]);
    assert_eq!(picker.current_index(), Some(22));
    assert_eq!(picker.centered_position(), Some(72 + 22));
}

#[test]
fn partial_drag_snaps_back_to_nearest_item() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);

    picker.with_host(|host| {
        host.drag_by(ITEM / 2 - 1);
        host.release();
        host.settle();
    });

    assert!(seen.borrow().is_empty());
    assert_eq!(picker.current_index(), Some(0));
    assert_eq!(picker.host().scroll_offset(), 72 * ITEM);
}

#[test]
fn scroll_to_index_centers_every_index() {
    for animated in [false, true] {
        let mut picker = hours(true);
        picker.attach().unwrap();

        for index in [5usize, 20, 0, 23, 12] {
            picker.scroll_to_index(index as i64, animated).unwrap();
            picker.with_host(|host| host.settle());

            assert_eq!(picker.current_index(), Some(index));
            assert_eq!(picker.current_value(), Some(&(index as u32)));
            assert!(!picker.is_scrolling());
            assert_eq!(picker.centered_position().map(|p| p.rem_euclid(24)), Some(index as i64));
            if animated {
                // Settled scrolls end on the anchor cycle.
                assert_eq!(picker.centered_position(), Some(72 + index as i64));
            }
        }
    }
}

#[test]
fn animated_scroll_reports_intermediate_indices() {
    let mut picker = hours(false);
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);
    let events = record_scroll_events(&mut picker);

    picker.scroll_to_index(3, true).unwrap();
    assert_eq!(picker.scroll_state(), ScrollState::Settling);
    while picker.with_host(|host| host.advance_frame()) {}

    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    let states: Vec<ScrollState> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            ScrollEvent::StateChanged(state) => Some(*state),
            ScrollEvent::Scrolled { .. } => None,
        })
        .collect();
    assert_eq!(states, vec![ScrollState::Settling, ScrollState::Idle]);
}

#[test]
fn out_of_range_index_is_rejected() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    picker.scroll_to_index(7, false).unwrap();

    assert_eq!(
        picker.scroll_to_index(-1, true),
        Err(PickerError::IndexOutOfRange { index: -1, count: 24 })
    );
    assert_eq!(
        picker.scroll_to_index(24, false),
        Err(PickerError::IndexOutOfRange { index: 24, count: 24 })
    );
    assert_eq!(picker.current_index(), Some(7));
}

#[test]
fn bounded_picker_stops_at_ends() {
    let mut picker = letters();
    let seen = record_selections(&mut picker);
    picker.attach().unwrap();
    assert_eq!(picker.current_value(), Some(&"A"));
    assert_eq!(picker.layout().unwrap().item_count, 3);

    picker.with_host(|host| {
        host.drag_by(-500);
        host.release();
        host.settle();
    });
    assert_eq!(picker.current_index(), Some(0));

    picker.with_host(|host| {
        host.drag_by(10 * ITEM);
        host.fling(4);
        host.settle();
    });
    assert_eq!(picker.current_value(), Some(&"C"));
    assert_eq!(picker.host().scroll_offset(), 2 * ITEM);
    // One large drag jumps straight past B.
    assert_eq!(*seen.borrow(), vec![0, 2]);

    picker.scroll_to_index(0, false).unwrap();
    picker.scroll_to_index(2, false).unwrap();
    assert_eq!(picker.current_index(), Some(2));
    assert_eq!(
        picker.scroll_to_index(3, false),
        Err(PickerError::IndexOutOfRange { index: 3, count: 3 })
    );
    assert_eq!(picker.current_index(), Some(2));
}

#[test]
fn queued_updates_are_reported_in_order() {
    let options = PickerOptions {
        item_extent: ITEM as u32,
        ..Default::default()
    };
    let mut picker = ValuePicker::with_values(SimulatedHost::new(320, 480), options, (0..10).collect::<Vec<u32>>());
    picker.attach().unwrap();
    let seen = record_selections(&mut picker);

    // Both moves reach the picker only after the closure returns.
    picker.with_host(|host| {
        host.drag_by(5 * ITEM);
        host.drag_by(-5 * ITEM);
    });

    assert_eq!(*seen.borrow(), vec![5, 0]);
    assert_eq!(picker.current_index(), Some(0));
}

#[test]
fn recenter_waits_while_a_new_drag_is_queued() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    let events = record_scroll_events(&mut picker);

    // Release lands exactly on an item, then the user grabs the list again.
    picker.with_host(|host| {
        host.drag_by(24 * ITEM);
        host.release();
        host.drag_by(10);
    });

    let states: Vec<ScrollState> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            ScrollEvent::StateChanged(state) => Some(*state),
            ScrollEvent::Scrolled { .. } => None,
        })
        .collect();
    assert_eq!(states, vec![ScrollState::Dragging, ScrollState::Idle, ScrollState::Dragging]);
    assert_eq!(picker.host().scroll_state(), ScrollState::Dragging);
    assert_eq!(picker.host().scroll_offset(), 96 * ITEM + 10);
    assert!(picker.is_scrolling());

    picker.with_host(|host| {
        host.release();
        host.settle();
    });
    assert_eq!(picker.current_index(), Some(0));
    assert_eq!(picker.centered_position(), Some(72));
}

#[test]
fn week_picker_wraps_backward_from_first_day() {
    let options = PickerOptions {
        cyclic: true,
        item_extent: ITEM as u32,
        ..Default::default()
    };
    let days = vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let mut picker = ValuePicker::with_values(SimulatedHost::new(320, 480), options, days);
    picker.attach().unwrap();
    assert_eq!(picker.centered_position(), Some(7 * 1000));
    let seen = record_selections(&mut picker);

    picker.with_host(|host| {
        host.drag_by(-ITEM);
        host.release();
        host.settle();
    });

    assert_eq!(*seen.borrow(), vec![6]);
    assert_eq!(picker.current_value(), Some(&"Sun"));
    assert_eq!(picker.centered_position(), Some(7 * 1000 + 6));
}

#[test]
fn animated_start_in_long_cyclic_list_is_short() {
    let options = PickerOptions {
        cyclic: true,
        item_extent: ITEM as u32,
        initial_index: 42,
        animate_initial: true,
        ..Default::default()
    };
    let mut picker =
        ValuePicker::with_values(SimulatedHost::new(320, 480), options, (0..10_000).collect::<Vec<u32>>());
    picker.attach().unwrap();
    assert!(picker.is_scrolling());

    let mut frames = 0;
    while picker.with_host(|host| host.advance_frame()) {
        frames += 1;
    }

    // Five items at the default eight pixels per frame.
    assert!(frames <= 5 * ITEM / 8, "frames={}", frames);
    assert_eq!(picker.current_index(), Some(42));
    assert!(!picker.is_scrolling());
}

#[test]
fn horizontal_layout_uses_width() {
    let mut picker = letters();
    picker.set_orientation(Orientation::Horizontal);
    picker.attach().unwrap();

    let layout = picker.layout().unwrap();
    assert_eq!(layout.viewport_extent, 320);
    assert_eq!(layout.edge_padding, 136);
}

#[test]
fn toggling_cyclic_keeps_selection() {
    let mut picker = hours(false);
    picker.attach().unwrap();
    picker.scroll_to_index(9, false).unwrap();

    picker.set_cyclic(true);
    picker.reconfigure();
    assert_eq!(picker.current_index(), Some(9));
    assert_eq!(picker.centered_position(), Some(72 + 9));

    picker.set_cyclic(false);
    picker.reconfigure();
    assert_eq!(picker.current_index(), Some(9));
    assert_eq!(picker.centered_position(), Some(9));
}

#[test]
fn listener_can_unregister_itself_during_delivery() {
    let mut picker = hours(false);
    let calls = Rc::new(Cell::new(0));
    let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

    let handle = picker.selection_listeners();
    let counter = calls.clone();
    let slot = own_id.clone();
    let id = picker.add_selection_listener(move |_event: &ValueSelected<u32>| {
        counter.set(counter.get() + 1);
        if let Some(id) = slot.get() {
            handle.remove(id);
        }
    });
    own_id.set(Some(id));
    let later = record_selections(&mut picker);

    picker.attach().unwrap();
    picker.scroll_to_index(4, false).unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(*later.borrow(), vec![0, 4]);
    assert!(!picker.remove_selection_listener(id));
}

#[test]
fn saved_state_survives_json() {
    let mut picker = hours(true);
    picker.attach().unwrap();
    picker.scroll_to_index(17, false).unwrap();

    let saved = picker.save_state().unwrap();
    let json = serde_json::to_string(&saved).unwrap();
    assert_eq!(json, r#"{"value":17}"#);

    let restored: SavedPickerState<u32> = serde_json::from_str(&json).unwrap();
    let mut other = hours(true);
    other.attach().unwrap();
    assert!(other.restore_state(&restored).unwrap());
    assert_eq!(other.current_index(), Some(17));
}
