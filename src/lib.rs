//! ng - A project workspace CLI with self-describing commands
//!
//! Every command carries a static description (name, scope, options) that
//! drives scope validation and help output. See [`command`] for the
//! lifecycle each command follows.

pub mod domain;
pub mod storage;
pub mod command;
pub mod cli;

pub use command::{Command, CommandError, Logger};
pub use domain::{Arguments, CommandDescription, CommandOption, CommandScope};
