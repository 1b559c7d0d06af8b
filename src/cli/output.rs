//! Terminal output for CLI commands

use crossterm::style::Stylize;
use serde::Serialize;

use crate::command::{LogLevel, Logger};

pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
///
/// This is the [`Logger`] commands write to when run from the `ng` binary.
pub struct Output {
    format: OutputFormat,
    verbose: bool,
    color: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool, color: bool) -> Self {
        Self {
            format,
            verbose,
            color,
        }
    }

    /// Prints an error message
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };

        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    /// Applies the help highlight color when color is enabled
    pub fn paint(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Logger for Output {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => self.verbose(message),
            LogLevel::Info => println!("{}", message),
            LogLevel::Error | LogLevel::Fatal => Output::error(self, message),
        }
    }

    fn is_json(&self) -> bool {
        Output::is_json(self)
    }

    fn data(&self, value: &serde_json::Value) {
        Output::data(self, value);
    }

    fn highlight(&self, text: &str) -> String {
        self.paint(text)
    }
}
