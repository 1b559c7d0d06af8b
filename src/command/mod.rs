//! # Command Lifecycle
//!
//! The contract every `ng` command follows.
//!
//! ```text
//! validate_and_run
//!   ├── validate_scope      (skipped for --help / --help-json)
//!   ├── initialize
//!   └── print_help | print_json_help | run
//! ```
//!
//! ## Scope
//!
//! | Scope | Runs when |
//! |-------|-----------|
//! | `OutOfProject` | no `ng.toml` was found |
//! | `InProject` | `ng.toml` was found and resolves |
//! | `Everywhere` | always |
//!
//! A scope violation logs one fatal line and returns
//! [`CommandError::FatalExit`]; the binary turns that into the process exit
//! code without printing anything else.

mod context;
mod error;
mod lifecycle;
mod logger;

pub use context::{CommandContext, CommandCore};
pub use error::{CommandError, ScopeViolation, SCOPE_VIOLATION_EXIT_CODE};
pub use lifecycle::{usage_line, Command, TOOL_NAME};
pub use logger::{BufferedLogger, LogLevel, Logger};
