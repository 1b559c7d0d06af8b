//! Workspace detection and resolution
//!
//! A directory is inside a project when it, or one of its parents, holds an
//! `ng.toml` file. [`CommandWorkspace`] records where that file was found;
//! [`WorkspaceResolver`] loads its contents on demand.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the workspace configuration file
pub const WORKSPACE_FILE: &str = "ng.toml";

const WORKSPACE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to parse workspace file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported workspace version {0} (expected 1)")]
    UnsupportedVersion(u32),

    #[error("Invalid key path '{0}'")]
    InvalidKeyPath(String),

    #[error("Cannot set '{0}': a parent key is not a table")]
    NotATable(String),

    #[error("Cannot set '{key}' to '{raw}': expected {expected}")]
    TypeMismatch {
        key: String,
        raw: String,
        expected: &'static str,
    },
}

/// The ambient workspace of an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWorkspace {
    root: PathBuf,
    config_file: Option<PathBuf>,
}

impl CommandWorkspace {
    pub fn new(root: impl Into<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_file,
        }
    }

    /// Detects the workspace containing `start`, walking up its parents
    ///
    /// When no workspace file is found, `root` is `start` itself.
    pub fn detect(start: &Path) -> Self {
        match find_workspace_file(start) {
            Some(file) => {
                let root = file
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| start.to_path_buf());
                Self::new(root, Some(file))
            }
            None => Self::new(start, None),
        }
    }

    /// Detects the workspace of the current directory
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::detect(&cwd))
    }

    /// Returns the project root, or the starting directory outside a project
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the workspace file, if the directory is inside a project
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

/// Finds `ng.toml` in `start` or the nearest parent that has one
pub fn find_workspace_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(WORKSPACE_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// A project entry in the workspace file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Project root, relative to the workspace root
    pub root: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parsed contents of `ng.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalWorkspace {
    pub version: u32,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,

    #[serde(default)]
    pub projects: BTreeMap<String, ProjectEntry>,
}

impl LocalWorkspace {
    /// Creates a workspace with one project at the root
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut projects = BTreeMap::new();
        projects.insert(
            name.clone(),
            ProjectEntry {
                root: String::new(),
                description: None,
            },
        );

        Self {
            version: WORKSPACE_VERSION,
            default_project: Some(name.clone()),
            name,
            projects,
        }
    }

    /// Parses workspace TOML
    pub fn parse(content: &str, path: &Path) -> Result<Self, WorkspaceError> {
        let workspace: Self = toml::from_str(content).map_err(|e| WorkspaceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if workspace.version != WORKSPACE_VERSION {
            return Err(WorkspaceError::UnsupportedVersion(workspace.version));
        }

        Ok(workspace)
    }

    /// Loads a workspace file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace file: {}", path.display()))?;

        Ok(Self::parse(&content, path)?)
    }

    /// Serializes to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize workspace")
    }

    /// Writes the workspace file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write workspace file: {}", path.display()))
    }
}

/// Loads workspace configuration on demand
pub trait WorkspaceResolver {
    /// Returns the workspace of the current project, or `None` outside one
    fn get_workspace(&self) -> Result<Option<LocalWorkspace>>;
}

/// Resolver backed by the workspace file on disk
#[derive(Debug, Clone, Default)]
pub struct FsWorkspaceResolver {
    local_file: Option<PathBuf>,
}

impl FsWorkspaceResolver {
    pub fn new(local_file: Option<PathBuf>) -> Self {
        Self { local_file }
    }

    /// Resolver for a detected workspace
    pub fn for_workspace(workspace: &CommandWorkspace) -> Self {
        Self::new(workspace.config_file().map(Path::to_path_buf))
    }
}

impl WorkspaceResolver for FsWorkspaceResolver {
    fn get_workspace(&self) -> Result<Option<LocalWorkspace>> {
        match &self.local_file {
            Some(path) if path.is_file() => LocalWorkspace::load(path).map(Some),
            _ => Ok(None),
        }
    }
}

/// Reads a dotted key (`projects.app.root`) from a TOML document
pub fn get_key<'a>(
    doc: &'a toml::Value,
    key: &str,
) -> Result<Option<&'a toml::Value>, WorkspaceError> {
    let mut current = doc;
    for segment in split_key(key)? {
        match current.get(segment) {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Writes a dotted key, creating intermediate tables
pub fn set_key(doc: &mut toml::Value, key: &str, value: toml::Value) -> Result<(), WorkspaceError> {
    let segments = split_key(key)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| WorkspaceError::InvalidKeyPath(key.to_string()))?;

    let mut current = doc;
    for segment in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| WorkspaceError::NotATable(key.to_string()))?;
        current = table
            .entry(segment.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| WorkspaceError::NotATable(key.to_string()))?
        .insert(last.to_string(), value);

    Ok(())
}

/// Interprets a command-line string for `key`
///
/// The value keeps the type already stored at `key`. New keys hold strings.
pub fn parse_scalar(
    key: &str,
    raw: &str,
    existing: Option<&toml::Value>,
) -> Result<toml::Value, WorkspaceError> {
    let mismatch = |expected| WorkspaceError::TypeMismatch {
        key: key.to_string(),
        raw: raw.to_string(),
        expected,
    };

    match existing {
        None | Some(toml::Value::String(_)) => Ok(toml::Value::String(raw.to_string())),
        Some(toml::Value::Integer(_)) => raw
            .parse()
            .map(toml::Value::Integer)
            .map_err(|_| mismatch("an integer")),
        Some(toml::Value::Float(_)) => raw
            .parse()
            .map(toml::Value::Float)
            .map_err(|_| mismatch("a number")),
        Some(toml::Value::Boolean(_)) => raw
            .parse()
            .map(toml::Value::Boolean)
            .map_err(|_| mismatch("true or false")),
        Some(toml::Value::Datetime(_)) => raw
            .parse()
            .map(toml::Value::Datetime)
            .map_err(|_| mismatch("a datetime")),
        Some(toml::Value::Array(_)) => Err(mismatch("an array")),
        Some(toml::Value::Table(_)) => Err(mismatch("a table")),
    }
}

fn split_key(key: &str) -> Result<Vec<&str>, WorkspaceError> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(WorkspaceError::InvalidKeyPath(key.to_string()));
    }
    Ok(segments)
}
