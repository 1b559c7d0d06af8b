//! Command registry
//!
//! Built once at startup with [`CommandRegistry::builtin`] and passed by
//! reference to whatever needs to look commands up.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use super::{config_cmd, help_cmd, new, status, version};
use crate::command::{Command, CommandContext, CommandCore, CommandError, Logger};
use crate::domain::CommandDescription;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("The specified command (\"{0}\") is invalid. For a list of available commands, run \"ng help\".")]
    Unknown(String),

    #[error("Command name or alias '{0}' is already registered")]
    Duplicate(String),
}

impl From<RegistryError> for CommandError {
    fn from(err: RegistryError) -> Self {
        CommandError::Failed(err.into())
    }
}

/// Builds a command instance from its core
pub type CommandFactory = fn(CommandCore, &CommandRegistry) -> Box<dyn Command>;

struct Entry {
    description: CommandDescription,
    factory: CommandFactory,
}

/// Maps command names and aliases to descriptions and factories
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command
    pub fn builtin() -> Self {
        let builtins: [(CommandDescription, CommandFactory); 5] = [
            (new::description(), new::create),
            (status::description(), status::create),
            (config_cmd::description(), config_cmd::create),
            (version::description(), version::create),
            (help_cmd::description(), help_cmd::create),
        ];

        let mut registry = Self::new();
        for (description, factory) in builtins {
            let registered = registry.register(description, factory);
            debug_assert!(registered.is_ok(), "built-in command names overlap");
        }
        registry
    }

    /// Adds a command; its name and aliases must not be taken
    pub fn register(
        &mut self,
        description: CommandDescription,
        factory: CommandFactory,
    ) -> Result<(), RegistryError> {
        let names: Vec<String> = std::iter::once(description.name.clone())
            .chain(description.aliases.iter().cloned())
            .collect();

        if let Some(taken) = names.iter().find(|n| self.index.contains_key(*n)) {
            return Err(RegistryError::Duplicate(taken.clone()));
        }

        let position = self.entries.len();
        for name in names {
            self.index.insert(name, position);
        }
        self.entries.push(Entry {
            description,
            factory,
        });

        Ok(())
    }

    /// Finds a description by name or alias
    pub fn find(&self, name: &str) -> Option<&CommandDescription> {
        self.index.get(name).map(|&i| &self.entries[i].description)
    }

    /// All descriptions in registration order
    pub fn descriptions(&self) -> impl Iterator<Item = &CommandDescription> {
        self.entries.iter().map(|e| &e.description)
    }

    /// Creates a fresh command instance for one invocation
    pub fn instantiate(
        &self,
        name: &str,
        context: Rc<CommandContext>,
        logger: Rc<dyn Logger>,
    ) -> Result<Box<dyn Command>, RegistryError> {
        let entry = self
            .index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))?;

        let core = CommandCore::new(context, entry.description.clone(), logger);
        Ok((entry.factory)(core, self))
    }
}
