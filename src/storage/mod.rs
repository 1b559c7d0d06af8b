//! # Storage Layer
//!
//! Workspace detection and configuration files.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Workspace | TOML | `ng.toml` at the project root |
//! | Global config | TOML | `~/.config/ng/config.toml` |
//!
//! ## Key Types
//!
//! - [`CommandWorkspace`] - Where the workspace file was found, if anywhere
//! - [`WorkspaceResolver`] - Loads [`LocalWorkspace`] contents on demand
//! - [`Config`] - Global user configuration

mod config;
mod workspace;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, CONFIG_DIR_ENV};
pub use workspace::{
    find_workspace_file, get_key, parse_scalar, set_key, CommandWorkspace, FsWorkspaceResolver,
    LocalWorkspace, ProjectEntry, WorkspaceError, WorkspaceResolver, WORKSPACE_FILE,
};
