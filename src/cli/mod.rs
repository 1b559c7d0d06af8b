//! # Command-Line Interface
//!
//! The `ng` binary: global flags, the command registry and built-in commands.
//!
//! ## Commands
//!
//! | Command | Scope | Purpose |
//! |---------|-------|---------|
//! | `new <name>` | outside a project | Create a workspace |
//! | `status` | inside a project | Show the workspace and its projects |
//! | `config [key] [value]` | inside a project | Read or write `ng.toml` |
//! | `version` | anywhere | Print the version |
//! | `help` | anywhere | List commands |
//!
//! Every command accepts `--help` and `--help-json`.
//!
//! ## Output Formats
//!
//! `--format json` switches command results and errors to JSON. Global flags
//! may come before or after the command name:
//! ```bash
//! ng --format json status
//! ng status --format json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod args;
mod output;
mod registry;
mod new;
mod status;
mod config_cmd;
mod version;
mod help_cmd;

pub use app::{dispatch, run, Cli, Invocation};
pub use args::{build_parser, parse_arguments};
pub use output::{Output, OutputFormat};
pub use registry::{CommandFactory, CommandRegistry, RegistryError};
