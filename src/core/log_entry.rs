//! Log record passed from the router to the host sink

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::error::Error;
use std::fmt;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// A single log record.
///
/// Arguments are kept apart from the message: the message text is passed through
/// untouched and a sink decides whether to interpolate with [`LogEntry::render`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
}

impl LogEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            args: Vec::new(),
            cause: None,
            timestamp: Utc::now(),
            thread_id: current_thread_id(),
            thread_name: current_thread_name(),
        }
    }

    pub fn with_args(mut self, args: &[&dyn fmt::Display]) -> Self {
        self.args = args.iter().map(|arg| arg.to_string()).collect();
        self
    }

    /// Attach an error and its `source()` chain as the cause of this record.
    pub fn with_cause(mut self, cause: &dyn Error) -> Self {
        let mut text = cause.to_string();
        let mut source = cause.source();
        while let Some(inner) = source {
            text.push_str("\nCaused by: ");
            text.push_str(&inner.to_string());
            source = inner.source();
        }
        self.cause = Some(text);
        self
    }

    /// Message with `{0}`, `{1}`, ... replaced by the matching argument.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            return self.message.clone();
        }

        let mut out = String::with_capacity(self.message.len());
        let mut rest = self.message.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                after[..close]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.args.get(idx))
                    .map(|arg| (arg, close))
            });
            match arg {
                Some((arg, close)) => {
                    out.push_str(arg);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Thread name, falling back to the thread id for unnamed threads
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}
