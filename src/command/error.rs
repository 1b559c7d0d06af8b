//! Errors raised by the command lifecycle

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used when a command is run in the wrong place
pub const SCOPE_VIOLATION_EXIT_CODE: u8 = 1;

/// Outcome of a failed lifecycle step
#[derive(Debug, Error)]
pub enum CommandError {
    /// Terminate the invocation with `code`; the reason was already logged
    #[error("command aborted with exit code {code}")]
    FatalExit { code: u8 },

    /// A hook or collaborator failed
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl CommandError {
    pub fn fatal(code: u8) -> Self {
        CommandError::FatalExit { code }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::FatalExit { code } => *code,
            CommandError::Failed(_) => 1,
        }
    }

    pub fn is_fatal_exit(&self) -> bool {
        matches!(self, CommandError::FatalExit { .. })
    }
}

/// Why a command refused to run where it was invoked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeViolation {
    #[error(
        "The {command} command requires to be run outside of a project, but a project definition was found at \"{}\".",
        .config_file.display()
    )]
    OutsideRequired { command: String, config_file: PathBuf },

    #[error(
        "The {command} command requires to be run in a project, but a project definition could not be found."
    )]
    InsideRequired { command: String },
}
