//! Per-caller sink that tags records with the calling thread's label

use super::identity::CallerIdentity;
use crate::core::{HostSink, LogEntry};
use std::sync::Arc;

/// Wraps the shared host sink for one non-main caller.
///
/// The host sink is both the emission target and the source of the severity threshold;
/// the threshold is read on every call.
pub struct CallerSink {
    label: String,
    parent: Arc<dyn HostSink>,
}

impl CallerSink {
    pub fn new(caller: &CallerIdentity, parent: Arc<dyn HostSink>) -> Self {
        Self {
            label: format!("[{}] ", caller.display_name()),
            parent,
        }
    }

    /// The `"[<name>] "` prefix prepended to every message
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Prefix the record's message with the label and hand it to the host sink.
    ///
    /// The record is consumed, so the rewrite never leaks into a later call.
    pub fn log(&self, mut entry: LogEntry) {
        if entry.severity < self.parent.min_level() {
            return;
        }
        entry.message.insert_str(0, &self.label);
        self.parent.publish(entry);
    }
}

impl std::fmt::Debug for CallerSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerSink")
            .field("label", &self.label)
            .field("parent", &self.parent.name())
            .finish()
    }
}
