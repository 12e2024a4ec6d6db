//! Debug verbosity levels and the gate that decides whether a debug message is emitted
//!
//! Debug levels are not totally ordered: `UserLog` and `SystemLog` are siblings, each
//! covered by itself and by `DeveloperLog`, but not by each other. `None` as a requested
//! level is a sentinel and never qualifies.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebugLevel {
    #[default]
    None,
    UserLog,
    SystemLog,
    DeveloperLog,
}

impl DebugLevel {
    pub const ALL: [DebugLevel; 4] = [
        DebugLevel::None,
        DebugLevel::UserLog,
        DebugLevel::SystemLog,
        DebugLevel::DeveloperLog,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            DebugLevel::None => "NONE",
            DebugLevel::UserLog => "USER_LOG",
            DebugLevel::SystemLog => "SYSTEM_LOG",
            DebugLevel::DeveloperLog => "DEVELOPER_LOG",
        }
    }

    /// Whether a plugin configured at `self` lets a message requested at `requested` through.
    #[inline]
    pub fn covers(self, requested: DebugLevel) -> bool {
        match (self, requested) {
            (_, DebugLevel::None) => false,
            (DebugLevel::DeveloperLog, _) => true,
            (DebugLevel::UserLog, DebugLevel::UserLog) => true,
            (DebugLevel::SystemLog, DebugLevel::SystemLog) => true,
            _ => false,
        }
    }
}

/// Gate a debug message requested at `requested` against the `configured` verbosity.
#[inline]
pub fn should_emit(requested: DebugLevel, configured: DebugLevel) -> bool {
    configured.covers(requested)
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for DebugLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "NONE" => Ok(DebugLevel::None),
            "USER_LOG" | "USER" => Ok(DebugLevel::UserLog),
            "SYSTEM_LOG" | "SYSTEM" => Ok(DebugLevel::SystemLog),
            "DEVELOPER_LOG" | "DEVELOPER" => Ok(DebugLevel::DeveloperLog),
            _ => Err(LoggerError::InvalidDebugLevel(s.to_string())),
        }
    }
}
