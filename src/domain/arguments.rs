//! Parsed command arguments

use std::collections::BTreeMap;

use serde_json::Value;

/// Parsed option values for one invocation
///
/// `help` and `help_json` are reserved and always present. Every other
/// option, positional or not, is keyed by its declared name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    pub help: bool,
    pub help_json: bool,
    values: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments requesting human-readable help
    pub fn help() -> Self {
        Self {
            help: true,
            ..Self::default()
        }
    }

    /// Arguments requesting JSON help
    pub fn help_json() -> Self {
        Self {
            help_json: true,
            ..Self::default()
        }
    }

    /// Sets a value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Returns the flag value, treating absent as false
    pub fn get_bool(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns true if either help flag is set
    pub fn wants_help(&self) -> bool {
        self.help || self.help_json
    }
}
