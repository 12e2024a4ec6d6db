//! # Plugin Logger
//!
//! Caller-scoped logging for plugins embedded in a host application.
//!
//! ## Features
//!
//! - **Caller Tagging**: Messages from worker threads are prefixed with `[<thread name>] `;
//!   the thread that initialized the router logs straight to the host sink
//! - **Debug Gating**: Four-way debug verbosity where user and system messages are
//!   siblings, both covered by developer verbosity
//! - **Debug Files**: Gated debug messages persisted to versioned
//!   `log-<LEVEL>-<date>-<N>.log` files under the plugin's data directory
//! - **Thread Safe**: Per-caller sinks are created at most once per thread

pub mod appenders;
pub mod core;
pub mod macros;
pub mod router;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::{MemoryAppender, MemoryHandle};
    pub use crate::core::{
        should_emit, Appender, DebugLevel, HostSink, LogEntry, Logger, LoggerBuilder,
        LoggerError, Plugin, PluginConfig, PluginDescriptor, Result, RouterMetrics, Severity,
    };
    pub use crate::router::{
        CallerIdentity, DebugFileConfig, PluginLogger, PluginLoggerBuilder, VersionScope,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
pub use appenders::{MemoryAppender, MemoryHandle};
pub use self::core::{
    should_emit, Appender, DebugLevel, HostSink, LogEntry, Logger, LoggerBuilder, LoggerError,
    Plugin, PluginConfig, PluginDescriptor, Result, RouterMetrics, Severity,
};
pub use router::{
    file_name, global, versioned_file_name, CallerIdentity, CallerRegistry, CallerSink,
    DebugFileConfig, DebugFileSink, PluginLogger, PluginLoggerBuilder, VersionScope,
    EXCEPTION_CAPTION,
};
