//! Static command metadata
//!
//! A [`CommandDescription`] is everything the lifecycle needs to know about a
//! command without running it: its name, where it may run, and its options.
//! Descriptions are immutable once built and serialize to the same JSON that
//! `--help-json` prints.

use serde::{Deserialize, Serialize};

/// Where a command is allowed to run relative to a project workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommandScope {
    /// Only outside of a project (e.g. `ng new`)
    #[serde(rename = "out")]
    OutOfProject,
    /// Only inside of a project
    #[serde(rename = "in")]
    InProject,
    /// Anywhere
    #[default]
    #[serde(rename = "all")]
    Everywhere,
}

/// Value type accepted by an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    String,
    Boolean,
    Number,
    Array,
}

/// A single option (flag or positional argument) of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOption {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Index among positional arguments; `None` for flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positional: Option<usize>,

    /// Short flags, without the leading dash
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default, rename = "type")]
    pub option_type: OptionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl CommandOption {
    /// Creates a string flag with no aliases
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            positional: None,
            aliases: Vec::new(),
            hidden: false,
            option_type: OptionType::String,
            default: None,
        }
    }

    /// Creates a boolean switch
    pub fn switch(name: impl Into<String>) -> Self {
        Self::flag(name).of_type(OptionType::Boolean)
    }

    /// Creates a positional argument at the given index
    pub fn positional(name: impl Into<String>, index: usize) -> Self {
        Self {
            positional: Some(index),
            ..Self::flag(name)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a short alias; duplicates are ignored
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn of_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns true if this option is supplied by position
    pub fn is_positional(&self) -> bool {
        self.positional.is_some()
    }
}

/// Immutable metadata for one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescription {
    pub name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Alternative command names
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Excluded from `ng help` listings
    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub scope: CommandScope,

    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            long_description: None,
            aliases: Vec::new(),
            hidden: false,
            scope: CommandScope::Everywhere,
            options: Vec::new(),
        }
    }

    pub fn scope(mut self, scope: CommandScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = Some(text.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Appends an option, keeping declaration order
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Positional options in declared order
    pub fn positionals(&self) -> impl Iterator<Item = &CommandOption> {
        self.options.iter().filter(|o| o.is_positional())
    }
}
