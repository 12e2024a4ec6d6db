//! Caller-scoped routing: per-thread sinks, the registry that memoizes them, gated debug
//! output, and versioned debug log files

pub mod caller_sink;
pub mod debug_file;
pub mod global;
pub mod identity;
pub mod plugin_logger;
pub mod registry;

pub use caller_sink::CallerSink;
pub use debug_file::{file_name, versioned_file_name, DebugFileConfig, DebugFileSink, VersionScope};
pub use identity::CallerIdentity;
pub use plugin_logger::{PluginLogger, PluginLoggerBuilder, EXCEPTION_CAPTION};
pub use registry::CallerRegistry;
