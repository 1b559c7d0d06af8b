//! State shared by a command instance

use std::rc::Rc;

use crate::domain::CommandDescription;
use crate::storage::{CommandWorkspace, WorkspaceResolver};

use super::logger::Logger;

/// Ambient context of one invocation
pub struct CommandContext {
    workspace: CommandWorkspace,
    resolver: Box<dyn WorkspaceResolver>,
}

impl CommandContext {
    pub fn new(workspace: CommandWorkspace, resolver: impl WorkspaceResolver + 'static) -> Self {
        Self {
            workspace,
            resolver: Box::new(resolver),
        }
    }

    pub fn workspace(&self) -> &CommandWorkspace {
        &self.workspace
    }

    pub fn resolver(&self) -> &dyn WorkspaceResolver {
        self.resolver.as_ref()
    }
}

/// What every command stores: its context, description and logger
pub struct CommandCore {
    context: Rc<CommandContext>,
    description: CommandDescription,
    logger: Rc<dyn Logger>,
}

impl CommandCore {
    pub fn new(
        context: Rc<CommandContext>,
        description: CommandDescription,
        logger: Rc<dyn Logger>,
    ) -> Self {
        Self {
            context,
            description,
            logger,
        }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    pub fn workspace(&self) -> &CommandWorkspace {
        self.context.workspace()
    }

    pub fn description(&self) -> &CommandDescription {
        &self.description
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}
