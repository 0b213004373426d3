//! Console Logger
//!
//! A `log` backend for browser apps. Records go to the browser console on
//! wasm32 (stderr elsewhere) and the newest ones are kept in a circular
//! buffer so the UI can show them.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// One formatted log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// Render as a single console line
    pub fn line(&self, app_name: &str) -> String {
        format!(
            "[{}] {} {} {}: {}",
            self.timestamp, app_name, self.level, self.target, self.message
        )
    }
}

/// Fixed-capacity buffer that drops the oldest entry when full
#[derive(Debug)]
pub struct RingBuffer {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Logger installed into the `log` facade
pub struct ConsoleLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Records at or above `min_level` severity, oldest first
    pub fn recent(&self, min_level: Level) -> Vec<LogEntry> {
        match self.buffer.lock() {
            Ok(buffer) => buffer
                .snapshot()
                .into_iter()
                .filter(|e| e.level <= min_level)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn emit(&self, entry: &LogEntry) {
        let line = entry.line(&self.app_name);
        #[cfg(target_arch = "wasm32")]
        {
            let value = wasm_bindgen::JsValue::from_str(&line);
            match entry.level {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.emit(&entry);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(entry);
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Calling it twice returns the `log` crate's error.
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(app_name, level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Buffered records at or above `min_level`, empty if the logger is not installed
pub fn recent_entries(min_level: Level) -> Vec<LogEntry> {
    LOGGER
        .get()
        .map(|logger| logger.recent(min_level))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: Level, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "12:00:00.000".to_string(),
            level,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(entry(Level::Info, &format!("m{}", i)));
        }
        let messages: Vec<_> = buffer.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_ring_buffer_zero_capacity_keeps_one() {
        let mut buffer = RingBuffer::new(0);
        buffer.push(entry(Level::Info, "a"));
        buffer.push(entry(Level::Info, "b"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.snapshot()[0].message, "b");
    }

    #[test]
    fn test_recent_filters_by_level() {
        let logger = ConsoleLogger::new("Test", LevelFilter::Debug, 10);
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("store")
                .args(format_args!("update failed"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("store")
                .args(format_args!("loaded"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .target("store")
                .args(format_args!("ignored"))
                .build(),
        );

        let errors = logger.recent(Level::Warn);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "update failed");
        assert_eq!(logger.recent(Level::Trace).len(), 2);
    }

    #[test]
    fn test_line_format() {
        let line = entry(Level::Warn, "hello").line("Atlas");
        assert_eq!(line, "[12:00:00.000] Atlas WARN test: hello");
    }
}
