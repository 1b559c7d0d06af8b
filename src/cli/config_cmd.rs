//! `ng config` - read or write workspace settings

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::registry::CommandRegistry;
use crate::command::{Command, CommandCore};
use crate::domain::{Arguments, CommandDescription, CommandOption, CommandScope};
use crate::storage::{get_key, parse_scalar, set_key, LocalWorkspace};

pub fn description() -> CommandDescription {
    CommandDescription::new("config", "Retrieves or sets values in the workspace file.")
        .scope(CommandScope::InProject)
        .long_description(
            "Keys are dotted paths into ng.toml, such as 'projects.api.root'. Without a key the whole file is printed.",
        )
        .option(
            CommandOption::positional("jsonPath", 0)
                .describe("The configuration key to set or query, in dotted form."),
        )
        .option(
            CommandOption::positional("value", 1)
                .describe("If provided, a new value for the given configuration key."),
        )
}

pub fn create(core: CommandCore, _registry: &CommandRegistry) -> Box<dyn Command> {
    Box::new(ConfigCommand {
        core,
        path: PathBuf::new(),
    })
}

struct ConfigCommand {
    core: CommandCore,
    path: PathBuf,
}

impl ConfigCommand {
    fn read_document(&self) -> Result<toml::Value> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read workspace file: {}", self.path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse workspace file: {}", self.path.display()))
    }

    fn get(&self, key: Option<&str>) -> Result<Option<u8>> {
        let logger = self.core.logger();
        let doc = self.read_document()?;

        let value = match key {
            Some(key) => get_key(&doc, key)?,
            None => Some(&doc),
        };

        let Some(value) = value else {
            logger.error("Value cannot be found.");
            return Ok(Some(1));
        };

        if logger.is_json() {
            logger.data(&serde_json::to_value(value).context("Failed to convert value to JSON")?);
        } else {
            logger.info(&render(value)?);
        }

        Ok(None)
    }

    fn set(&self, key: &str, raw: &str) -> Result<Option<u8>> {
        let mut doc = self.read_document()?;
        let value = parse_scalar(key, raw, get_key(&doc, key)?)?;
        set_key(&mut doc, key, value)?;

        let content = toml::to_string_pretty(&doc).context("Failed to serialize workspace")?;
        // Refuse edits that would leave an unreadable workspace
        LocalWorkspace::parse(&content, &self.path)?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write workspace file: {}", self.path.display()))?;

        self.core
            .logger()
            .debug(&format!("Set '{}' in {}", key, self.path.display()));
        Ok(None)
    }
}

impl Command for ConfigCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn initialize(&mut self, args: &Arguments) -> Result<()> {
        if args.wants_help() {
            return Ok(());
        }

        self.path = self
            .core
            .workspace()
            .config_file()
            .context("No workspace file found")?
            .to_path_buf();
        Ok(())
    }

    fn run(&mut self, args: &Arguments) -> Result<Option<u8>> {
        match (args.get_str("jsonPath"), args.get_str("value")) {
            (Some(key), Some(value)) => self.set(key, value),
            (key, None) => self.get(key),
            (None, Some(_)) => anyhow::bail!("A key is required to set a value."),
        }
    }
}

fn render(value: &toml::Value) -> Result<String> {
    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(table) => toml::to_string_pretty(table)
            .context("Failed to render table")?
            .trim_end()
            .to_string(),
        other => other.to_string(),
    })
}
