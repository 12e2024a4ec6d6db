//! Plugin descriptor capability and its JSON-backed configuration

use super::{
    debug_level::DebugLevel,
    error::{LoggerError, Result},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What the router needs to know about the plugin it logs for.
///
/// Both values are queried on every debug call, so a plugin can change its verbosity at
/// runtime and have it take effect immediately.
pub trait Plugin: Send + Sync {
    fn data_dir(&self) -> PathBuf;
    fn debug_level(&self) -> DebugLevel;
}

/// On-disk plugin configuration
///
/// ```
/// use plugin_logger::{DebugLevel, PluginConfig};
///
/// let config = PluginConfig::from_json_str(
///     r#"{ "name": "ImageOnMap", "data_dir": "plugins/ImageOnMap", "debug_level": "USER_LOG" }"#,
/// ).unwrap();
/// assert_eq!(config.debug_level, DebugLevel::UserLog);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    pub data_dir: PathBuf,
    #[serde(default)]
    pub debug_level: DebugLevel,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            data_dir: data_dir.into(),
            debug_level: DebugLevel::None,
        }
    }

    #[must_use]
    pub fn with_debug_level(mut self, level: DebugLevel) -> Self {
        self.debug_level = level;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PluginConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| LoggerError::io_operation("reading plugin config", path, e))?;
        Self::from_json_str(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| LoggerError::io_operation("writing plugin config", path, e))
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("PluginConfig", "plugin name must not be empty"));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(LoggerError::config("PluginConfig", "data_dir must not be empty"));
        }
        Ok(())
    }
}

/// In-process [`Plugin`] implementation with a runtime-adjustable debug level
#[derive(Debug)]
pub struct PluginDescriptor {
    name: String,
    data_dir: PathBuf,
    debug_level: RwLock<DebugLevel>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            data_dir: data_dir.into(),
            debug_level: RwLock::new(DebugLevel::None),
        }
    }

    pub fn from_config(config: PluginConfig) -> Self {
        Self {
            name: config.name,
            data_dir: config.data_dir,
            debug_level: RwLock::new(config.debug_level),
        }
    }

    #[must_use]
    pub fn with_debug_level(self, level: DebugLevel) -> Self {
        self.set_debug_level(level);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_debug_level(&self, level: DebugLevel) {
        *self.debug_level.write() = level;
    }
}

impl Plugin for PluginDescriptor {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn debug_level(&self) -> DebugLevel {
        *self.debug_level.read()
    }
}
