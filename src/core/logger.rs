//! Host logger: the concrete sink a plugin hands to the router

use super::{
    error::Result,
    log_entry::LogEntry,
    severity::Severity,
    sink::{Appender, HostSink},
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Named, severity-filtered fan-out to a set of appenders.
///
/// A `Logger` is shared behind an `Arc` by the main thread and every per-caller sink, so
/// all of its state is behind interior locks.
pub struct Logger {
    name: String,
    min_level: RwLock<Severity>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    logged: AtomicU64,
    dropped: AtomicU64,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(Severity::Info),
            appenders: RwLock::new(Vec::new()),
            logged: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Deliver one entry to every appender with per-appender panic isolation
    ///
    /// A failing or panicking appender does not keep the others from receiving the entry.
    fn process_sync(appenders: &mut [Box<dyn Appender>], entry: &LogEntry) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Change the severity threshold; takes effect on the next call from any thread.
    pub fn set_min_level(&self, level: Severity) {
        *self.min_level.write() = level;
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.publish(LogEntry::new(severity, message));
    }

    /// Entries that reached every appender
    pub fn logged_count(&self) -> u64 {
        self.logged.load(Ordering::Relaxed)
    }

    /// Entries at least one appender failed to take
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl HostSink for Logger {
    fn publish(&self, entry: LogEntry) {
        if entry.severity < *self.min_level.read() {
            return;
        }

        let mut appenders = self.appenders.write();
        if Self::process_sync(&mut appenders, &entry) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        } else {
            self.logged.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn min_level(&self) -> Severity {
        *self.min_level.read()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing a host [`Logger`]
///
/// # Example
/// ```
/// use plugin_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("MapRenderer")
///     .min_level(Severity::Warning)
///     .appender(MemoryAppender::new())
///     .build();
///
/// assert_eq!(logger.min_level(), Severity::Warning);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: Severity,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: "plugin".to_string(),
            min_level: Severity::Info,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
