//! In-memory appender that keeps every record it receives

use crate::core::{Appender, LogEntry, Result, Severity};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures records so an embedder can inspect, forward, or assert on them later.
///
/// The appender is moved into a [`crate::Logger`]; keep a [`MemoryHandle`] from
/// [`MemoryAppender::handle`] to read what was captured.
///
/// ```
/// use plugin_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let handle = memory.handle();
/// let logger = Logger::builder().appender(memory).build();
///
/// logger.log(Severity::Info, "Map saved");
/// assert_eq!(handle.messages(), vec!["Map saved"]);
/// ```
#[derive(Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Read side of a [`MemoryAppender`]
#[derive(Clone, Default)]
pub struct MemoryHandle {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryHandle {
    /// Snapshot of every captured entry, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Raw (un-rendered) messages, in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.severity == severity)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
