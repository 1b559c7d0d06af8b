//! `ng version`

use anyhow::Result;

use super::registry::CommandRegistry;
use crate::command::{Command, CommandCore};
use crate::domain::{Arguments, CommandDescription, CommandScope};

pub fn description() -> CommandDescription {
    CommandDescription::new("version", "Outputs the ng version.")
        .alias("v")
        .scope(CommandScope::Everywhere)
}

pub fn create(core: CommandCore, _registry: &CommandRegistry) -> Box<dyn Command> {
    Box::new(VersionCommand { core })
}

struct VersionCommand {
    core: CommandCore,
}

impl Command for VersionCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn run(&mut self, _args: &Arguments) -> Result<Option<u8>> {
        let logger = self.core.logger();
        let version = env!("CARGO_PKG_VERSION");
        let workspace = self.core.workspace().config_file();

        if logger.is_json() {
            logger.data(&serde_json::json!({
                "version": version,
                "workspace": workspace.map(|p| p.display().to_string()),
            }));
        } else {
            logger.info(&format!("ng {}", version));
            if let Some(path) = workspace {
                logger.info(&format!("Workspace: {}", path.display()));
            }
        }

        Ok(None)
    }
}
