//! Browser console logging behind the `log` facade.
//!
//! Informational records (`info!`, `debug!`) are only written in debug builds
//! or when the `console_logging` feature is enabled. Warnings and errors are
//! always written.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Most verbose level written to the console
#[must_use]
pub fn max_level() -> LevelFilter {
    if cfg!(any(debug_assertions, feature = "console_logging")) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("[{}] {}", record.target(), record.args());
        let message = wasm_bindgen::JsValue::from_str(&message);
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling it again is harmless.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level());
    }
}
