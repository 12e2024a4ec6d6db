//! Output seams: the host sink the router delegates to, and the appenders a host logger
//! fans records out to

use super::{error::Result, log_entry::LogEntry, severity::Severity};

/// A concrete output destination owned by a [`crate::Logger`].
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// The single shared output the router ultimately delegates to.
///
/// Implementations provide their own thread safety; the router never serializes calls
/// to `publish`.
pub trait HostSink: Send + Sync {
    /// Emit a record. Records below `min_level()` may be discarded.
    fn publish(&self, entry: LogEntry);

    /// Current severity threshold, queried on every call.
    fn min_level(&self) -> Severity;

    fn name(&self) -> &str;
}
