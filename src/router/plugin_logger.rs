//! The caller-scoped router and its debug entry points

use super::{
    debug_file::{self, DebugFileConfig, DebugFileSink, VersionScope},
    identity::CallerIdentity,
    registry::CallerRegistry,
};
use crate::core::{
    DebugLevel, HostSink, LogEntry, LoggerError, Plugin, RouterMetrics, Severity,
};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// Caption of the second record emitted by the cause-plus-args forms
pub const EXCEPTION_CAPTION: &str = "Exception : ";

/// Process logging state for one plugin.
///
/// Built by [`PluginLogger::init`] on the thread that counts as the main caller. Calls
/// from the main thread go straight to the host sink; calls from any other thread go
/// through that thread's [`super::CallerSink`], which prefixes `"[<thread name>] "`.
///
/// ```
/// use plugin_logger::prelude::*;
/// use std::sync::Arc;
///
/// let memory = MemoryAppender::new();
/// let records = memory.handle();
/// let host = Arc::new(Logger::builder().appender(memory).build());
/// let logger = Arc::new(PluginLogger::init(host));
///
/// logger.info("Loaded {0} maps", &[&12]);
///
/// let worker = Arc::clone(&logger);
/// std::thread::Builder::new()
///     .name("renderer".into())
///     .spawn(move || worker.warning("Slow frame", &[]))
///     .unwrap()
///     .join()
///     .unwrap();
///
/// assert_eq!(records.messages(), vec!["Loaded {0} maps", "[renderer] Slow frame"]);
/// ```
pub struct PluginLogger {
    main: CallerIdentity,
    host: Arc<dyn HostSink>,
    registry: CallerRegistry,
    files: DebugFileSink,
    metrics: Arc<RouterMetrics>,
}

impl PluginLogger {
    /// Capture the calling thread as the main caller and start with an empty registry.
    #[must_use]
    pub fn init(host: Arc<dyn HostSink>) -> Self {
        Self::builder(host).build()
    }

    #[must_use]
    pub fn builder(host: Arc<dyn HostSink>) -> PluginLoggerBuilder {
        PluginLoggerBuilder::new(host)
    }

    pub fn main_caller(&self) -> &CallerIdentity {
        &self.main
    }

    pub fn host(&self) -> &Arc<dyn HostSink> {
        &self.host
    }

    pub fn registry(&self) -> &CallerRegistry {
        &self.registry
    }

    pub fn debug_files(&self) -> &DebugFileSink {
        &self.files
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    fn dispatch(&self, entry: LogEntry) {
        if thread::current().id() == self.main.id() {
            self.metrics.record_main_routed();
            self.host.publish(entry);
            return;
        }

        let caller = CallerIdentity::current();
        let (sink, created) = self.registry.sink_for(&caller, &self.host);
        if created {
            self.metrics.record_caller_registered();
        }
        self.metrics.record_caller_routed();
        sink.log(entry);
    }

    // ---------------------------------------------------------------------
    // Severity-tagged output
    // ---------------------------------------------------------------------

    pub fn log(&self, severity: Severity, message: impl Into<String>, args: &[&dyn Display]) {
        self.dispatch(LogEntry::new(severity, message).with_args(args));
    }

    pub fn log_cause(&self, severity: Severity, message: impl Into<String>, cause: &dyn Error) {
        self.dispatch(LogEntry::new(severity, message).with_cause(cause));
    }

    /// Two records: the message with its args, then the cause under [`EXCEPTION_CAPTION`].
    pub fn log_cause_with_args(
        &self,
        severity: Severity,
        message: impl Into<String>,
        cause: &dyn Error,
        args: &[&dyn Display],
    ) {
        self.log(severity, message, args);
        self.log_cause(severity, EXCEPTION_CAPTION, cause);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log(Severity::Info, message, args);
    }

    #[inline]
    pub fn info_cause(&self, message: impl Into<String>, cause: &dyn Error) {
        self.log_cause(Severity::Info, message, cause);
    }

    #[inline]
    pub fn info_cause_with_args(
        &self,
        message: impl Into<String>,
        cause: &dyn Error,
        args: &[&dyn Display],
    ) {
        self.log_cause_with_args(Severity::Info, message, cause, args);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log(Severity::Warning, message, args);
    }

    #[inline]
    pub fn warning_cause(&self, message: impl Into<String>, cause: &dyn Error) {
        self.log_cause(Severity::Warning, message, cause);
    }

    #[inline]
    pub fn warning_cause_with_args(
        &self,
        message: impl Into<String>,
        cause: &dyn Error,
        args: &[&dyn Display],
    ) {
        self.log_cause_with_args(Severity::Warning, message, cause, args);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log(Severity::Error, message, args);
    }

    #[inline]
    pub fn error_cause(&self, message: impl Into<String>, cause: &dyn Error) {
        self.log_cause(Severity::Error, message, cause);
    }

    #[inline]
    pub fn error_cause_with_args(
        &self,
        message: impl Into<String>,
        cause: &dyn Error,
        args: &[&dyn Display],
    ) {
        self.log_cause_with_args(Severity::Error, message, cause, args);
    }

    // ---------------------------------------------------------------------
    // Gated debug output
    // ---------------------------------------------------------------------

    fn emit_gated(
        &self,
        configured: DebugLevel,
        level: DebugLevel,
        message: &str,
        args: &[&dyn Display],
    ) -> bool {
        if !configured.covers(level) {
            self.metrics.record_debug_suppressed();
            return false;
        }
        self.metrics.record_debug_emitted();
        self.info(message, args);
        true
    }

    /// Emit `message` at INFO if the plugin's current debug level covers `level`.
    ///
    /// Returns whether the message was emitted.
    pub fn debug(
        &self,
        plugin: &dyn Plugin,
        level: DebugLevel,
        message: &str,
        args: &[&dyn Display],
    ) -> bool {
        self.emit_gated(plugin.debug_level(), level, message, args)
    }

    /// Gate and emit each message in order, reusing `args` for all of them.
    ///
    /// Returns how many were emitted.
    pub fn debug_all<S: AsRef<str>>(
        &self,
        plugin: &dyn Plugin,
        level: DebugLevel,
        messages: &[S],
        args: &[&dyn Display],
    ) -> usize {
        let mut emitted = 0;
        for message in messages {
            if self.debug(plugin, level, message.as_ref(), args) {
                emitted += 1;
            }
        }
        emitted
    }

    /// Gated debug output that also persists to a fresh versioned file.
    ///
    /// With `keep_in_memory_only` this is [`PluginLogger::debug`]. Otherwise the message is
    /// emitted, `<data_dir>/logs` is created if needed, and a new
    /// `log-<LEVEL>-<date>-<N>.log` is created holding the raw message when the level is
    /// covered. Filesystem failures are logged at ERROR and never returned.
    ///
    /// Returns the created file, if any.
    pub fn debug_to_file(
        &self,
        keep_in_memory_only: bool,
        plugin: &dyn Plugin,
        level: DebugLevel,
        message: &str,
        args: &[&dyn Display],
    ) -> Option<PathBuf> {
        if keep_in_memory_only {
            self.debug(plugin, level, message, args);
            return None;
        }

        let configured = plugin.debug_level();
        self.emit_gated(configured, level, message, args);

        let logs_dir = match self.files.ensure_logs_dir(plugin) {
            Ok(dir) => dir,
            Err(e) => {
                self.report_file_failure("Can't create debug log directory", &e);
                return None;
            }
        };

        let date = self.files.today();
        let written = self
            .files
            .create_versioned(&logs_dir, configured, date)
            .and_then(|(path, mut file)| {
                let wrote = debug_file::write_gated(&mut file, &path, level, configured, message)?;
                Ok((path, wrote))
            });

        match written {
            Ok((path, wrote)) => {
                if wrote {
                    self.metrics.record_file_written();
                }
                Some(path)
            }
            Err(e) => {
                self.report_file_failure("Can't write debug log file", &e);
                None
            }
        }
    }

    /// Gated debug output into a caller-chosen file, created or overwritten.
    ///
    /// Same gating and failure handling as [`PluginLogger::debug_to_file`], without
    /// versioning or directory creation. Returns whether the file was created.
    pub fn debug_to(
        &self,
        file: &Path,
        plugin: &dyn Plugin,
        level: DebugLevel,
        message: &str,
        args: &[&dyn Display],
    ) -> bool {
        let configured = plugin.debug_level();
        self.emit_gated(configured, level, message, args);

        let written = debug_file::open_truncated(file).and_then(|mut handle| {
            debug_file::write_gated(&mut handle, file, level, configured, message)
        });

        match written {
            Ok(wrote) => {
                if wrote {
                    self.metrics.record_file_written();
                }
                true
            }
            Err(e) => {
                self.report_file_failure("Can't write debug log file", &e);
                false
            }
        }
    }

    fn report_file_failure(&self, what: &str, err: &LoggerError) {
        self.metrics.record_file_failure();
        let target = err
            .path()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.to_string())
            })
            .unwrap_or_default();
        self.error_cause(format!("{} {}", what, target), err);
    }
}

/// Builder for [`PluginLogger`]
///
/// # Example
/// ```
/// use plugin_logger::prelude::*;
/// use std::sync::Arc;
///
/// let host = Arc::new(Logger::builder().name("ImageOnMap").build());
/// let logger = PluginLogger::builder(host)
///     .logs_dir_name("debug-logs")
///     .version_scope(VersionScope::LogsDirectory)
///     .build();
///
/// assert_eq!(logger.debug_files().config().logs_dir_name, "debug-logs");
/// ```
pub struct PluginLoggerBuilder {
    host: Arc<dyn HostSink>,
    files: DebugFileConfig,
    today: Option<fn() -> NaiveDate>,
    metrics: Option<Arc<RouterMetrics>>,
}

impl PluginLoggerBuilder {
    pub fn new(host: Arc<dyn HostSink>) -> Self {
        Self {
            host,
            files: DebugFileConfig::default(),
            today: None,
            metrics: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug_files(mut self, config: DebugFileConfig) -> Self {
        self.files = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logs_dir_name(mut self, name: impl Into<String>) -> Self {
        self.files.logs_dir_name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn version_scope(mut self, scope: VersionScope) -> Self {
        self.files.version_scope = scope;
        self
    }

    /// Date used in debug file names (local date by default)
    #[must_use = "builder methods return a new value"]
    pub fn date_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Share a metrics instance, e.g. to keep counters across re-initialization
    #[must_use = "builder methods return a new value"]
    pub fn metrics(mut self, metrics: Arc<RouterMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the router; the calling thread becomes the main caller.
    pub fn build(self) -> PluginLogger {
        let mut files = DebugFileSink::new(self.files);
        if let Some(today) = self.today {
            files = files.with_date_source(today);
        }

        PluginLogger {
            main: CallerIdentity::current(),
            host: self.host,
            registry: CallerRegistry::new(),
            files,
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{MemoryAppender, MemoryHandle};
    use crate::core::{Logger, PluginDescriptor};

    fn router() -> (PluginLogger, MemoryHandle) {
        let memory = MemoryAppender::new();
        let handle = memory.handle();
        let host = Arc::new(Logger::builder().appender(memory).build());
        (PluginLogger::init(host), handle)
    }

    #[test]
    fn test_main_thread_routes_to_host() {
        let (logger, records) = router();

        logger.info("Plugin enabled", &[]);
        logger.warning("Config outdated", &[]);

        assert_eq!(records.messages(), vec!["Plugin enabled", "Config outdated"]);
        assert!(logger.registry().is_empty());
        assert_eq!(logger.metrics().main_routed(), 2);
    }

    #[test]
    fn test_worker_thread_gets_prefixed() {
        let (logger, records) = router();
        let logger = Arc::new(logger);

        let worker = Arc::clone(&logger);
        thread::Builder::new()
            .name("map-io".to_string())
            .spawn(move || {
                worker.info("one", &[]);
                worker.error("two", &[]);
            })
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(records.messages(), vec!["[map-io] one", "[map-io] two"]);
        assert_eq!(logger.registry().len(), 1);
        assert_eq!(logger.metrics().callers_registered(), 1);
        assert_eq!(logger.metrics().caller_routed(), 2);
    }

    #[test]
    fn test_args_travel_with_entry() {
        let (logger, records) = router();
        logger.info("Rendered {0} of {1}", &[&3, &"7"]);

        let entry = &records.entries()[0];
        assert_eq!(entry.args, vec!["3", "7"]);
        assert_eq!(entry.render(), "Rendered 3 of 7");
    }

    #[test]
    fn test_cause_with_args_emits_two_records() {
        let (logger, records) = router();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");

        logger.error_cause_with_args("Sync of {0} failed", &err, &[&"map-5"]);

        let entries = records.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Sync of {0} failed");
        assert!(entries[0].cause.is_none());
        assert_eq!(entries[1].message, EXCEPTION_CAPTION);
        assert_eq!(entries[1].cause.as_deref(), Some("socket closed"));
        assert!(entries.iter().all(|e| e.severity == Severity::Error));
    }

    #[test]
    fn test_severity_aliases() {
        let (logger, records) = router();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");

        logger.info("i", &[]);
        logger.warning_cause("w", &err);
        logger.error("e", &[]);

        let severities: Vec<Severity> = records.entries().iter().map(|e| e.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Info, Severity::Warning, Severity::Error]
        );
    }

    #[test]
    fn test_debug_gate_reads_level_each_call() {
        let (logger, records) = router();
        let plugin = PluginDescriptor::new("test", "/unused");

        assert!(!logger.debug(&plugin, DebugLevel::UserLog, "hidden", &[]));
        plugin.set_debug_level(DebugLevel::UserLog);
        assert!(logger.debug(&plugin, DebugLevel::UserLog, "shown", &[]));
        assert!(!logger.debug(&plugin, DebugLevel::SystemLog, "sibling", &[]));

        assert_eq!(records.messages(), vec!["shown"]);
        assert_eq!(records.entries()[0].severity, Severity::Info);
        assert_eq!(logger.metrics().debug_suppressed(), 2);
    }

    #[test]
    fn test_debug_all_keeps_order() {
        let (logger, records) = router();
        let plugin = PluginDescriptor::new("test", "/unused").with_debug_level(DebugLevel::DeveloperLog);

        let emitted = logger.debug_all(&plugin, DebugLevel::SystemLog, &["a", "b", "c"], &[&1]);

        assert_eq!(emitted, 3);
        assert_eq!(records.messages(), vec!["a", "b", "c"]);
        assert!(records.entries().iter().all(|e| e.args == vec!["1"]));
    }

    #[test]
    fn test_keep_in_memory_only_touches_no_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let (logger, records) = router();
        let plugin = PluginDescriptor::new("test", dir.path()).with_debug_level(DebugLevel::UserLog);

        let file = logger.debug_to_file(true, &plugin, DebugLevel::UserLog, "mem", &[]);

        assert!(file.is_none());
        assert_eq!(records.messages(), vec!["mem"]);
        assert!(!dir.path().join("logs").exists());
    }

    #[test]
    fn test_reinit_resets_registry() {
        let memory = MemoryAppender::new();
        let host: Arc<dyn HostSink> = Arc::new(Logger::builder().appender(memory).build());
        let first = Arc::new(PluginLogger::init(Arc::clone(&host)));

        let worker = Arc::clone(&first);
        thread::spawn(move || worker.info("x", &[])).join().unwrap();
        assert_eq!(first.registry().len(), 1);

        let second = PluginLogger::init(host);
        assert!(second.registry().is_empty());
    }
}
