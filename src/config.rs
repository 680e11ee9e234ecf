//! Configuration file support for snappick.
//!
//! Configuration is loaded from `~/.config/snappick/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/snappick/config.toml
//! orientation = "vertical"
//! cyclic = true
//! initial_index = 8
//! item_extent = 1
//!
//! # Either an explicit list...
//! values = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
//! # ...or a numeric range (inclusive)
//! range_start = 0
//! range_end = 23
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::layout::Orientation;
use crate::picker::{DEFAULT_CYCLIC_ENABLED, PickerOptions};

/// Default numeric range when no values are configured.
const DEFAULT_RANGE: (i64, i64) = (0, 23);
/// One terminal cell per item.
const DEFAULT_TERMINAL_ITEM_EXTENT: u32 = 1;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Scroll axis of the picker
    pub orientation: Option<Orientation>,

    /// Whether the values wrap around
    pub cyclic: Option<bool>,

    /// Index centered when the picker starts
    pub initial_index: Option<usize>,

    /// Item size along the scroll axis, in terminal cells
    pub item_extent: Option<u32>,

    /// Animate into the initial index instead of jumping there
    pub animate_initial: Option<bool>,

    /// Explicit values; takes precedence over the range
    pub values: Option<Vec<String>>,

    /// First value of the numeric range
    pub range_start: Option<i64>,

    /// Last value of the numeric range (inclusive)
    pub range_end: Option<i64>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snappick")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        orientation: Option<Orientation>,
        cyclic: Option<bool>,
        initial_index: Option<usize>,
        values: Option<Vec<String>>,
    ) -> Self {
        if orientation.is_some() {
            self.orientation = orientation;
        }
        if cyclic.is_some() {
            self.cyclic = cyclic;
        }
        if initial_index.is_some() {
            self.initial_index = initial_index;
        }
        if values.as_ref().is_some_and(|values| !values.is_empty()) {
            self.values = values;
        }
        self
    }

    /// Whether the picker wraps, falling back to `SNAPPICK_CYCLIC` or the default.
    pub fn cyclic(&self) -> bool {
        self.cyclic
            .or_else(|| std::env::var("SNAPPICK_CYCLIC").ok().and_then(|v| parse_bool(&v)))
            .unwrap_or(DEFAULT_CYCLIC_ENABLED)
    }

    /// The values to pick from.
    pub fn values(&self) -> Vec<String> {
        if let Some(values) = &self.values {
            return values.clone();
        }
        let start = self.range_start.unwrap_or(DEFAULT_RANGE.0);
        let end = self.range_end.unwrap_or(DEFAULT_RANGE.1);
        (start..=end).map(|value| value.to_string()).collect()
    }

    /// Options for the picker core.
    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            orientation: self.orientation.unwrap_or_default(),
            cyclic: self.cyclic(),
            initial_index: self.initial_index.unwrap_or(0),
            item_extent: self.item_extent.unwrap_or(DEFAULT_TERMINAL_ITEM_EXTENT).max(1),
            animate_initial: self.animate_initial.unwrap_or(false),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
