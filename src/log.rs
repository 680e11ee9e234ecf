//! File logging for snappick.
//!
//! Nothing is written until `init` opens a log file, so embedding the picker
//! core in another host (or running the tests) stays silent.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use once_cell::sync::Lazy;
use chrono::Local;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Initialize logging to a file
pub fn init() -> std::io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".snappick")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("snappick_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    log("=== snappick started ===");

    Ok(log_path)
}

/// Whether a log file is currently open
pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Log a message with timestamp
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Log a picker event (selection, scroll state, recentering)
pub fn log_event(event: &str) {
    log(&format!("[EVENT] {}", event));
}

/// Log a degraded or unexpected condition
pub fn log_warn(msg: &str) {
    log(&format!("[WARN] {}", msg));
}

/// Route panics into the log file before the default hook prints them.
///
/// The terminal is usually in raw mode when a panic happens, so the default
/// output can be lost; the log keeps a copy.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log(&format!("[PANIC] {}", info));
        default_hook(info);
    }));
}
