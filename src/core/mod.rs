//! Core types: severities, debug levels, log records, sink traits and the host logger

pub mod debug_level;
pub mod error;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod plugin;
pub mod severity;
pub mod sink;

pub use debug_level::{should_emit, DebugLevel};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::RouterMetrics;
pub use plugin::{Plugin, PluginConfig, PluginDescriptor};
pub use severity::Severity;
pub use sink::{Appender, HostSink};
