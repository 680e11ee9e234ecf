//! Scroll-snap value picker.
//!
//! A picker shows an ordered list of values as a linear list that always comes
//! to rest with one item in the center, optionally wrapping around forever.
//! The crate holds the toolkit-independent core; a concrete list widget plugs
//! in through [`host::ScrollHost`].
//!
//! ```ignore
//! let host = SimulatedHost::new(320, 480);
//! let mut picker = ValuePicker::with_values(host, PickerOptions::default(), (0..24).collect::<Vec<_>>());
//! picker.add_selection_listener(|event| println!("selected {}", event.value));
//! picker.attach()?;
//! picker.scroll_to_index(5, true)?;
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod layout;
pub mod listeners;
pub mod log;
pub mod picker;
pub mod scroll;
pub mod selection;
pub mod snap;

pub use error::{PickerError, Result};
pub use host::{HostEvent, ScrollHost, SimulatedHost};
pub use index::{MAX_POSITION, Position};
pub use layout::{LayoutSnapshot, Orientation};
pub use listeners::ListenerId;
pub use picker::{PickerOptions, SavedPickerState, ValuePicker, ValueSelected, VisibleItem};
pub use scroll::{ScrollEvent, ScrollState};
