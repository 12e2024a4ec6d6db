//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
pub use memory::{MemoryAppender, MemoryHandle};

pub use crate::core::Appender;
