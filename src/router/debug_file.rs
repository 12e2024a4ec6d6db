//! Versioned debug log files
//!
//! Each file-producing debug call gets its own file named
//! `log-<LEVEL>-<YYYY-MM-DD>-<N>.log`, where `N` starts at 1 and is bumped past every name
//! that is already taken. The file holds the raw, un-interpolated message, and only when the
//! plugin's configured debug level covers the requested one.

use crate::core::{DebugLevel, LoggerError, Plugin, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where an existing file counts as a collision when picking a version number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionScope {
    /// Check inside the logs directory, claiming the name atomically with `create_new`.
    #[default]
    LogsDirectory,

    /// Check the bare file name relative to the process working directory, then truncate
    /// the file of that name inside the logs directory. Matches the layout older
    /// deployments expect; concurrent callers may overwrite each other.
    WorkingDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFileConfig {
    /// Subdirectory of the plugin data directory holding debug files
    pub logs_dir_name: String,
    pub version_scope: VersionScope,
}

impl Default for DebugFileConfig {
    fn default() -> Self {
        Self {
            logs_dir_name: "logs".to_string(),
            version_scope: VersionScope::default(),
        }
    }
}

/// `log-<LEVEL>-<YYYY-MM-DD>-<version>.log`
pub fn file_name(level: DebugLevel, date: NaiveDate, version: u32) -> String {
    format!("log-{}-{}-{}.log", level, date.format("%Y-%m-%d"), version)
}

/// First versioned name, counting from 1, for which `exists` reports no collision.
///
/// ```
/// use chrono::NaiveDate;
/// use plugin_logger::{versioned_file_name, DebugLevel};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let taken = ["log-DEVELOPER_LOG-2024-01-01-1.log", "log-DEVELOPER_LOG-2024-01-01-2.log"];
/// let name = versioned_file_name(DebugLevel::DeveloperLog, date, |n| taken.contains(&n));
/// assert_eq!(name, "log-DEVELOPER_LOG-2024-01-01-3.log");
/// ```
pub fn versioned_file_name(
    level: DebugLevel,
    date: NaiveDate,
    mut exists: impl FnMut(&str) -> bool,
) -> String {
    let mut version = 1;
    loop {
        let name = file_name(level, date, version);
        if !exists(&name) {
            return name;
        }
        version += 1;
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Filesystem side of file-producing debug calls
pub struct DebugFileSink {
    config: DebugFileConfig,
    today: fn() -> NaiveDate,
}

impl DebugFileSink {
    pub fn new(config: DebugFileConfig) -> Self {
        Self {
            config,
            today: local_today,
        }
    }

    /// Replace the date used in file names (local date by default)
    #[must_use]
    pub fn with_date_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &DebugFileConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn logs_dir(&self, plugin: &dyn Plugin) -> PathBuf {
        plugin.data_dir().join(&self.config.logs_dir_name)
    }

    /// Create the logs directory if needed; an existing directory is fine.
    pub fn ensure_logs_dir(&self, plugin: &dyn Plugin) -> Result<PathBuf> {
        let dir = self.logs_dir(plugin);
        fs::create_dir_all(&dir)
            .map_err(|e| LoggerError::io_operation("creating logs directory", &dir, e))?;
        Ok(dir)
    }

    /// Create the next free versioned file for `level` in `logs_dir`.
    pub fn create_versioned(
        &self,
        logs_dir: &Path,
        level: DebugLevel,
        date: NaiveDate,
    ) -> Result<(PathBuf, File)> {
        match self.config.version_scope {
            VersionScope::LogsDirectory => {
                let mut version = 1;
                loop {
                    let path = logs_dir.join(file_name(level, date, version));
                    match OpenOptions::new().write(true).create_new(true).open(&path) {
                        Ok(file) => return Ok((path, file)),
                        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => version += 1,
                        Err(e) => {
                            return Err(LoggerError::io_operation("creating debug log file", &path, e))
                        }
                    }
                }
            }
            VersionScope::WorkingDirectory => {
                let name = versioned_file_name(level, date, |name| Path::new(name).exists());
                let path = logs_dir.join(name);
                let file = open_truncated(&path)?;
                Ok((path, file))
            }
        }
    }
}

impl Default for DebugFileSink {
    fn default() -> Self {
        Self::new(DebugFileConfig::default())
    }
}

/// Create `path`, or truncate it if it already exists.
pub(crate) fn open_truncated(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| LoggerError::io_operation("creating debug log file", path, e))
}

/// Write `message` verbatim when `configured` covers `requested`.
///
/// Returns whether anything was written.
pub(crate) fn write_gated(
    file: &mut File,
    path: &Path,
    requested: DebugLevel,
    configured: DebugLevel,
    message: &str,
) -> Result<bool> {
    if !configured.covers(requested) {
        return Ok(false);
    }
    file.write_all(message.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| LoggerError::io_operation("writing debug log file", path, e))?;
    Ok(true)
}
