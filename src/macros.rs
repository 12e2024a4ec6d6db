//! Logging macros that format the message with `format!` before routing it.
//!
//! The router's own `{0}`-style arguments are left empty; use these when the message can
//! be rendered up front.
//!
//! # Examples
//!
//! ```
//! use plugin_logger::prelude::*;
//! use plugin_logger::info;
//! use std::sync::Arc;
//!
//! let logger = PluginLogger::init(Arc::new(Logger::new("ImageOnMap")));
//!
//! let count = 12;
//! info!(logger, "Loaded {} maps", count);
//! ```

/// Log a formatted message at the given severity.
///
/// ```
/// # use plugin_logger::prelude::*;
/// # let logger = PluginLogger::init(std::sync::Arc::new(Logger::new("test")));
/// use plugin_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+), &[])
    };
}

/// Log a formatted info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a formatted warning.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log a formatted error.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Gate a formatted debug message against the plugin's debug level.
///
/// ```
/// # use plugin_logger::prelude::*;
/// # let logger = PluginLogger::init(std::sync::Arc::new(Logger::new("test")));
/// use plugin_logger::debug;
/// let plugin = PluginDescriptor::new("test", "/tmp").with_debug_level(DebugLevel::UserLog);
/// debug!(logger, &plugin, DebugLevel::UserLog, "Player {} joined", "Amaury");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $plugin:expr, $level:expr, $($arg:tt)+) => {
        $logger.debug($plugin, $level, &format!($($arg)+), &[])
    };
}
