//! Process-wide router for embedders that prefer free functions over passing a
//! [`PluginLogger`] around
//!
//! [`init`] must run before anything else; running it again replaces the router and
//! forgets every registered caller. Before `init`, [`try_current`] reports
//! [`LoggerError::NotInitialized`] and the free functions drop the message with a note
//! on stderr.

use super::plugin_logger::{PluginLogger, PluginLoggerBuilder};
use crate::core::{DebugLevel, HostSink, LoggerError, Plugin, Result, Severity};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

static CURRENT: RwLock<Option<Arc<PluginLogger>>> = parking_lot::const_rwlock(None);

/// Install a router whose main caller is the calling thread.
pub fn init(host: Arc<dyn HostSink>) -> Arc<PluginLogger> {
    install(PluginLogger::builder(host))
}

/// Install a router from a configured builder; the calling thread becomes the main caller.
pub fn install(builder: PluginLoggerBuilder) -> Arc<PluginLogger> {
    let logger = Arc::new(builder.build());
    *CURRENT.write() = Some(Arc::clone(&logger));
    logger
}

pub fn try_current() -> Result<Arc<PluginLogger>> {
    CURRENT.read().clone().ok_or(LoggerError::NotInitialized)
}

pub fn is_initialized() -> bool {
    CURRENT.read().is_some()
}

fn with_current(f: impl FnOnce(&PluginLogger)) {
    match try_current() {
        Ok(logger) => f(&logger),
        Err(e) => eprintln!("[LOGGER ERROR] {}; message dropped", e),
    }
}

pub fn log(severity: Severity, message: impl Into<String>, args: &[&dyn Display]) {
    with_current(|logger| logger.log(severity, message, args));
}

pub fn log_cause(severity: Severity, message: impl Into<String>, cause: &dyn Error) {
    with_current(|logger| logger.log_cause(severity, message, cause));
}

pub fn log_cause_with_args(
    severity: Severity,
    message: impl Into<String>,
    cause: &dyn Error,
    args: &[&dyn Display],
) {
    with_current(|logger| logger.log_cause_with_args(severity, message, cause, args));
}

pub fn info(message: impl Into<String>, args: &[&dyn Display]) {
    log(Severity::Info, message, args);
}

pub fn info_cause(message: impl Into<String>, cause: &dyn Error) {
    log_cause(Severity::Info, message, cause);
}

pub fn info_cause_with_args(
    message: impl Into<String>,
    cause: &dyn Error,
    args: &[&dyn Display],
) {
    log_cause_with_args(Severity::Info, message, cause, args);
}

pub fn warning(message: impl Into<String>, args: &[&dyn Display]) {
    log(Severity::Warning, message, args);
}

pub fn warning_cause(message: impl Into<String>, cause: &dyn Error) {
    log_cause(Severity::Warning, message, cause);
}

pub fn warning_cause_with_args(
    message: impl Into<String>,
    cause: &dyn Error,
    args: &[&dyn Display],
) {
    log_cause_with_args(Severity::Warning, message, cause, args);
}

pub fn error(message: impl Into<String>, args: &[&dyn Display]) {
    log(Severity::Error, message, args);
}

pub fn error_cause(message: impl Into<String>, cause: &dyn Error) {
    log_cause(Severity::Error, message, cause);
}

pub fn error_cause_with_args(
    message: impl Into<String>,
    cause: &dyn Error,
    args: &[&dyn Display],
) {
    log_cause_with_args(Severity::Error, message, cause, args);
}

pub fn debug(plugin: &dyn Plugin, level: DebugLevel, message: &str, args: &[&dyn Display]) {
    with_current(|logger| {
        logger.debug(plugin, level, message, args);
    });
}

pub fn debug_all<S: AsRef<str>>(
    plugin: &dyn Plugin,
    level: DebugLevel,
    messages: &[S],
    args: &[&dyn Display],
) {
    with_current(|logger| {
        logger.debug_all(plugin, level, messages, args);
    });
}

pub fn debug_to_file(
    keep_in_memory_only: bool,
    plugin: &dyn Plugin,
    level: DebugLevel,
    message: &str,
    args: &[&dyn Display],
) {
    with_current(|logger| {
        logger.debug_to_file(keep_in_memory_only, plugin, level, message, args);
    });
}

pub fn debug_to(
    file: &Path,
    plugin: &dyn Plugin,
    level: DebugLevel,
    message: &str,
    args: &[&dyn Display],
) {
    with_current(|logger| {
        logger.debug_to(file, plugin, level, message, args);
    });
}
