//! Terminal application state.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;

use snappick::config::Config;
use snappick::log;
use snappick::scroll::WheelGesture;
use snappick::{Orientation, PickerOptions, ScrollEvent, ScrollState, SimulatedHost, ValuePicker, ValueSelected};

use crate::events::Action;

/// Settling speed of the terminal list, in cells per frame.
const FRAME_STEP: i64 = 1;
/// Blank cells on each side of a label in horizontal mode.
const LABEL_GAP: u32 = 2;

/// What the listeners have told us, for the status line.
#[derive(Debug, Default)]
pub struct StatusLine {
    pub scroll_state: ScrollState,
    pub selections: usize,
}

pub struct App {
    pub picker: ValuePicker<String, SimulatedHost>,
    pub wheel: WheelGesture,
    pub status: Rc<RefCell<StatusLine>>,
    /// Picker viewport on screen, as of the last frame
    pub picker_area: Rect,
    /// Item size configured for vertical mode
    vertical_extent: u32,
    pub chosen: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, picker_area: Rect) -> snappick::Result<Self> {
        let options: PickerOptions = config.picker_options();
        let host = SimulatedHost::new(u32::from(picker_area.width), u32::from(picker_area.height))
            .with_frame_step(FRAME_STEP);
        let picker = ValuePicker::with_values(host, options, config.values());

        let mut app = Self {
            picker,
            wheel: WheelGesture::default(),
            status: Rc::new(RefCell::new(StatusLine::default())),
            picker_area,
            vertical_extent: options.item_extent,
            chosen: None,
            should_quit: false,
        };
        app.register_listeners();
        app.fit_item_extent()?;
        app.picker.attach()?;
        Ok(app)
    }

    fn register_listeners(&mut self) {
        let status = self.status.clone();
        self.picker.add_scroll_listener(move |event| {
            if let ScrollEvent::StateChanged(state) = event {
                status.borrow_mut().scroll_state = *state;
                log::log_event(&format!("scroll state {}", state.label()));
            }
        });

        let status = self.status.clone();
        self.picker.add_selection_listener(move |event: &ValueSelected<String>| {
            status.borrow_mut().selections += 1;
            log::log_event(&format!("value selected {} ({})", event.value, event.index));
        });
    }

    /// Items are one label wide in horizontal mode, the configured size otherwise.
    fn fit_item_extent(&mut self) -> snappick::Result<()> {
        match self.picker.orientation() {
            Orientation::Vertical => self.picker.set_item_extent(self.vertical_extent),
            Orientation::Horizontal => {
                let widths: Vec<u32> = self
                    .picker
                    .values()
                    .iter()
                    .map(|value| value.chars().count() as u32 + LABEL_GAP)
                    .collect();
                if widths.is_empty() {
                    return Ok(());
                }
                self.picker.set_item_extents(&widths)
            }
        }
    }

    /// Track the on-screen picker area; reconfigures when it changed.
    pub fn fit_viewport(&mut self, area: Rect) {
        if area == self.picker_area {
            return;
        }
        self.picker_area = area;
        self.picker
            .host_mut()
            .resize(u32::from(area.width), u32::from(area.height));
        self.picker.reconfigure();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Confirm => {
                self.chosen = self.picker.current_value().cloned();
                self.should_quit = true;
            }
            Action::Step(direction) => self.step(direction),
            Action::Wheel(direction) => self.wheel_tick(direction),
            Action::SelectIndex(index) => self.scroll_to(index as i64, true),
            Action::First => self.scroll_to(0, true),
            Action::Last => self.scroll_to(self.picker.value_count() as i64 - 1, true),
            Action::ToggleOrientation => {
                let orientation = self.picker.orientation().toggled();
                self.picker.set_orientation(orientation);
                self.reconfigure();
            }
            Action::ToggleCyclic => {
                let cyclic = !self.picker.is_cyclic();
                self.picker.set_cyclic(cyclic);
                self.reconfigure();
            }
        }
    }

    /// Per-frame work: end quiet wheel gestures and advance settling.
    pub fn tick(&mut self) {
        let released = self.wheel.poll_release();
        self.picker.with_host(|host| {
            if released {
                host.release();
            }
            host.advance_frame();
        });
    }

    fn reconfigure(&mut self) {
        if let Err(e) = self.fit_item_extent() {
            log::log_warn(&format!("cannot fit item extent: {}", e));
        }
        self.picker.reconfigure();
    }

    fn step(&mut self, direction: i64) {
        let count = self.picker.value_count() as i64;
        let Some(current) = self.picker.current_index() else {
            return;
        };
        let mut target = current as i64 + direction;
        if self.picker.is_cyclic() {
            target = target.rem_euclid(count.max(1));
        } else {
            target = target.clamp(0, count - 1);
        }
        self.scroll_to(target, true);
    }

    fn scroll_to(&mut self, index: i64, animated: bool) {
        if let Err(e) = self.picker.scroll_to_index(index, animated) {
            log::log_warn(&format!("scroll to {} failed: {}", index, e));
        }
    }

    fn wheel_tick(&mut self, direction: i64) {
        let Some(delta) = self.wheel.accumulate(direction) else {
            return;
        };
        let extent = i64::from(self.picker.item_extent());
        self.picker.with_host(|host| {
            host.drag_by(delta * extent);
        });
    }

    /// Index of the item drawn at terminal cell (x, y), if any.
    pub fn index_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.picker_area;
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }
        let along = match self.picker.orientation() {
            Orientation::Vertical => i64::from(y - area.y),
            Orientation::Horizontal => i64::from(x - area.x),
        };
        let extent = i64::from(self.picker.item_extent());
        self.picker
            .visible_items()
            .into_iter()
            .find(|item| (item.start..item.start + extent).contains(&along))
            .map(|item| item.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = Config::default().with_overrides(
            None,
            Some(true),
            Some(0),
            Some(vec!["a".into(), "bb".into(), "ccc".into()]),
        );
        App::new(&config, Rect::new(0, 0, 20, 11)).unwrap()
    }

    fn settle(app: &mut App) {
        for _ in 0..100 {
            app.tick();
        }
    }

    #[test]
    fn test_step_wraps_in_cyclic_mode() {
        let mut app = app();
        assert_eq!(app.picker.current_index(), Some(0));

        app.dispatch(Action::Step(-1));
        settle(&mut app);
        assert_eq!(app.picker.current_index(), Some(2));
        assert_eq!(app.status.borrow().scroll_state, ScrollState::Idle);
    }

    #[test]
    fn test_confirm_records_value() {
        let mut app = app();
        app.dispatch(Action::Step(1));
        settle(&mut app);
        app.dispatch(Action::Confirm);
        assert_eq!(app.chosen.as_deref(), Some("bb"));
        assert!(app.should_quit);
    }

    #[test]
    fn test_horizontal_items_fit_longest_label() {
        let mut app = app();
        app.dispatch(Action::ToggleOrientation);
        assert_eq!(app.picker.orientation(), Orientation::Horizontal);
        assert_eq!(app.picker.item_extent(), 5);
        assert_eq!(app.picker.current_index(), Some(0));
    }

    #[test]
    fn test_click_selects_item_under_cursor() {
        let mut app = app();
        // Vertical, 11 rows, item extent 1: the center row is 5.
        assert_eq!(app.index_at(3, 5), Some(0));
        assert_eq!(app.index_at(3, 6), Some(1));
        assert_eq!(app.index_at(30, 6), None);

        app.dispatch(Action::SelectIndex(1));
        settle(&mut app);
        assert_eq!(app.picker.current_index(), Some(1));
    }
}
