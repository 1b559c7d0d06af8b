//! Logger contract used by commands
//!
//! Commands never print directly. Every line goes through a [`Logger`], which
//! decides where it ends up (terminal, buffer, ...).

use std::cell::RefCell;

/// Severity of a logged line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
    Fatal,
}

/// Sink for command output
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn fatal(&self, message: &str) {
        self.log(LogLevel::Fatal, message);
    }

    /// Returns true if command results should be emitted as JSON
    fn is_json(&self) -> bool {
        false
    }

    /// Emits structured data
    fn data(&self, value: &serde_json::Value) {
        self.info(&serde_json::to_string_pretty(value).unwrap_or_default());
    }

    /// Emphasizes a name in help output; plain text by default
    fn highlight(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct BufferedLogger {
    entries: RefCell<Vec<(LogLevel, String)>>,
    json: bool,
}

impl BufferedLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffered logger that asks commands for JSON results
    pub fn json() -> Self {
        Self {
            json: true,
            ..Self::default()
        }
    }

    /// All recorded lines with their level
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.borrow().clone()
    }

    /// Lines recorded at exactly `level`
    pub fn lines(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn info_lines(&self) -> Vec<String> {
        self.lines(LogLevel::Info)
    }

    /// Info lines joined with newlines, as a terminal would show them
    pub fn info_text(&self) -> String {
        self.info_lines().join("\n")
    }
}

impl Logger for BufferedLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }

    fn is_json(&self) -> bool {
        self.json
    }
}
