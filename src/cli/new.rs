//! `ng new` - create a workspace

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use super::registry::CommandRegistry;
use crate::command::{Command, CommandCore};
use crate::domain::{Arguments, CommandDescription, CommandOption, CommandScope};
use crate::storage::{LocalWorkspace, WORKSPACE_FILE};

pub fn description() -> CommandDescription {
    CommandDescription::new("new", "Creates a new workspace.")
        .alias("n")
        .scope(CommandScope::OutOfProject)
        .long_description(
            "Creates a directory holding an ng.toml workspace file with one project at its root.",
        )
        .option(CommandOption::positional("name", 0).describe("The name of the new workspace."))
        .option(
            CommandOption::flag("directory")
                .describe("The directory to create the workspace in. Defaults to the workspace name."),
        )
        .option(
            CommandOption::switch("dryRun")
                .alias("d")
                .describe("Run through and report activity without writing out results.")
                .with_default(false),
        )
        .option(
            CommandOption::switch("force")
                .describe("Overwrite an existing workspace file.")
                .hide(),
        )
}

pub fn create(core: CommandCore, _registry: &CommandRegistry) -> Box<dyn Command> {
    Box::new(NewCommand {
        core,
        name: String::new(),
        target: PathBuf::new(),
    })
}

struct NewCommand {
    core: CommandCore,
    name: String,
    target: PathBuf,
}

impl Command for NewCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn initialize(&mut self, args: &Arguments) -> Result<()> {
        if args.wants_help() {
            return Ok(());
        }

        let name = args.get_str("name").ok_or_else(|| {
            anyhow::anyhow!("A workspace name is required. Run 'ng new --help' for usage.")
        })?;
        validate_name(name)?;

        let directory = args.get_str("directory").unwrap_or(name);
        self.name = name.to_string();
        self.target = self.core.workspace().root().join(directory);

        self.core
            .logger()
            .debug(&format!("Workspace target: {}", self.target.display()));
        Ok(())
    }

    fn run(&mut self, args: &Arguments) -> Result<Option<u8>> {
        let logger = self.core.logger();
        let config_path = self.target.join(WORKSPACE_FILE);

        if config_path.exists() && !args.get_bool("force") {
            bail!(
                "A workspace file already exists at {}. Use --force to overwrite it.",
                config_path.display()
            );
        }

        let workspace = LocalWorkspace::new(&self.name);

        if args.get_bool("dryRun") {
            logger.info(&format!("CREATE {} (dry run)", config_path.display()));
            logger.info(&workspace.to_toml()?);
            return Ok(None);
        }

        fs::create_dir_all(&self.target).with_context(|| {
            format!("Failed to create directory: {}", self.target.display())
        })?;
        workspace.save(&config_path)?;

        if logger.is_json() {
            logger.data(&serde_json::json!({
                "created": true,
                "name": self.name,
                "path": config_path.display().to_string(),
            }));
        } else {
            logger.info(&format!("CREATE {}", config_path.display()));
            logger.info(&format!("Workspace '{}' created.", self.name));
        }

        Ok(None)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        bail!(
            "Workspace name '{}' is invalid. Names start with a letter and contain only letters, digits, '-' and '_'.",
            name
        );
    }
    Ok(())
}
