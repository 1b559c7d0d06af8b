//! `ng help` - list available commands

use anyhow::Result;

use super::registry::CommandRegistry;
use crate::command::{Command, CommandCore, TOOL_NAME};
use crate::domain::{Arguments, CommandDescription, CommandScope};

pub fn description() -> CommandDescription {
    CommandDescription::new("help", "Lists available commands and their short descriptions.")
        .scope(CommandScope::Everywhere)
}

pub fn create(core: CommandCore, registry: &CommandRegistry) -> Box<dyn Command> {
    let mut commands: Vec<CommandDescription> = registry
        .descriptions()
        .filter(|d| !d.hidden)
        .cloned()
        .collect();
    commands.sort_by(|a, b| a.name.cmp(&b.name));

    Box::new(HelpCommand { core, commands })
}

struct HelpCommand {
    core: CommandCore,
    commands: Vec<CommandDescription>,
}

impl Command for HelpCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn run(&mut self, _args: &Arguments) -> Result<Option<u8>> {
        let logger = self.core.logger();

        if logger.is_json() {
            let items: Vec<_> = self
                .commands
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "name": d.name,
                        "description": d.description,
                        "aliases": d.aliases,
                        "scope": d.scope,
                    })
                })
                .collect();
            logger.data(&serde_json::Value::Array(items));
            return Ok(None);
        }

        logger.info("Available Commands:");
        for command in &self.commands {
            let aliases = if command.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", command.aliases.join(", "))
            };
            logger.info(&format!(
                "  {}{} {}",
                logger.highlight(&command.name),
                aliases,
                command.description
            ));
        }

        logger.info("");
        logger.info(&format!(
            "For more detailed help run \"{} [command name] --help\"",
            TOOL_NAME
        ));

        Ok(None)
    }
}
