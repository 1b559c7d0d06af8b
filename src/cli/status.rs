//! `ng status` - show the current workspace

use anyhow::{Context, Result};

use super::registry::CommandRegistry;
use crate::command::{Command, CommandCore};
use crate::domain::{Arguments, CommandDescription, CommandScope};
use crate::storage::LocalWorkspace;

pub fn description() -> CommandDescription {
    CommandDescription::new("status", "Shows the workspace and its projects.")
        .scope(CommandScope::InProject)
}

pub fn create(core: CommandCore, _registry: &CommandRegistry) -> Box<dyn Command> {
    Box::new(StatusCommand {
        core,
        workspace: None,
    })
}

struct StatusCommand {
    core: CommandCore,
    workspace: Option<LocalWorkspace>,
}

impl Command for StatusCommand {
    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn initialize(&mut self, args: &Arguments) -> Result<()> {
        if args.wants_help() {
            return Ok(());
        }

        self.workspace = self.core.context().resolver().get_workspace()?;
        Ok(())
    }

    fn run(&mut self, _args: &Arguments) -> Result<Option<u8>> {
        let logger = self.core.logger();
        let workspace = self
            .workspace
            .as_ref()
            .context("Workspace was not loaded")?;
        let root = self.core.workspace().root();

        if logger.is_json() {
            logger.data(&serde_json::json!({
                "name": workspace.name,
                "root": root.display().to_string(),
                "default_project": workspace.default_project,
                "projects": workspace.projects,
            }));
            return Ok(None);
        }

        logger.info(&format!("Workspace: {}", workspace.name));
        logger.info(&format!("Root: {}", root.display()));
        if let Some(default) = &workspace.default_project {
            logger.info(&format!("Default project: {}", default));
        }

        logger.info("");
        if workspace.projects.is_empty() {
            logger.info("No projects.");
            return Ok(None);
        }

        logger.info(&format!("{:<20} {:<20} DESCRIPTION", "PROJECT", "ROOT"));
        logger.info(&"-".repeat(60));
        for (name, project) in &workspace.projects {
            let project_root = if project.root.is_empty() {
                "."
            } else {
                project.root.as_str()
            };
            let row = format!(
                "{:<20} {:<20} {}",
                name,
                project_root,
                project.description.as_deref().unwrap_or("")
            );
            logger.info(row.trim_end());
        }

        Ok(None)
    }
}
