//! Console appender implementation

use crate::core::{Appender, LogEntry, Result, Severity};
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
    show_thread: bool,
    time_format: String,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            show_thread: false,
            time_format: "%H:%M:%S".to_string(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Also print the emitting thread's name after the severity
    ///
    /// Off by default since per-caller sinks already prefix worker-thread messages.
    #[must_use]
    pub fn with_thread(mut self, show_thread: bool) -> Self {
        self.show_thread = show_thread;
        self
    }

    /// Set a strftime-compatible time format
    ///
    /// # Examples
    ///
    /// ```
    /// use plugin_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new().with_time_format("%Y-%m-%d %H:%M:%S");
    /// ```
    #[must_use]
    pub fn with_time_format(mut self, format_str: &str) -> Self {
        self.time_format = format_str.to_string();
        self
    }

    /// Escape line breaks so one record cannot forge additional console lines.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n").replace('\r', "\\r")
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        let level_str = if self.use_colors {
            entry
                .severity
                .to_str()
                .color(entry.severity.color_code())
                .to_string()
        } else {
            entry.severity.to_str().to_string()
        };

        let time = entry.timestamp.format(&self.time_format);
        let message = Self::sanitize(&entry.render());

        let mut output = if self.show_thread {
            format!("[{} {}] [{}]: {}", time, level_str, entry.thread_label(), message)
        } else {
            format!("[{} {}]: {}", time, level_str, message)
        };

        // The cause keeps its own line breaks, indented under the record
        if let Some(ref cause) = entry.cause {
            for line in cause.lines() {
                output.push_str("\n    ");
                output.push_str(line);
            }
        }

        output
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.format_text(entry);

        match entry.severity {
            Severity::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
