//! Index generation from a nested command tree
//!
//! Command trees are described in TOML or JSON and flattened into an
//! [`InMemoryIndex`] keyed by dotted path. The root's parameters become the
//! global parameters at the empty path.
//!
//! ```toml
//! name = "aws"
//! parameters = ["region", "endpoint-url"]
//!
//! [values]
//! output = ["json", "text", "table"]
//!
//! [[commands]]
//! name = "ec2"
//!
//! [[commands.commands]]
//! name = "describe-instances"
//! parameters = ["instance-ids", "reserve"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::{InMemoryIndex, PATH_SEPARATOR, ROOT_PATH};
use crate::error::{IndexError, Result};

/// A command and its subcommands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name as typed on the command line
    pub name: String,

    /// Parameter names without the `--` marker
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Subcommands
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// Top level of an index file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// The program itself; its parameters are global
    #[serde(flatten)]
    pub root: CommandSpec,

    /// Value choices per parameter name
    #[serde(default)]
    pub values: HashMap<String, Vec<String>>,
}

/// Result of loading an index file
#[derive(Debug, Clone, Default)]
pub struct LoadedIndex {
    /// Flattened command index
    pub index: InMemoryIndex,

    /// Value choices per parameter name
    pub values: HashMap<String, Vec<String>>,
}

impl IndexSpec {
    /// Parse an index description from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IndexError::InvalidFormat(e.to_string()).into())
    }

    /// Parse an index description from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| IndexError::InvalidFormat(e.to_string()).into())
    }

    /// Flatten the command tree and carry over value choices
    pub fn build(&self) -> Result<LoadedIndex> {
        Ok(LoadedIndex {
            index: generate(&self.root)?,
            values: self.values.clone(),
        })
    }
}

/// Flatten a command tree into an index
pub fn generate(root: &CommandSpec) -> Result<InMemoryIndex> {
    check_name(ROOT_PATH, &root.name)?;

    let mut index = InMemoryIndex::new()
        .with_children(ROOT_PATH, [root.name.as_str()])
        .with_parameters(ROOT_PATH, root.parameters.iter().map(String::as_str));
    index.entry_mut(&root.name);

    add_subcommands(&mut index, &root.name, &root.commands)?;

    tracing::debug!(program = %root.name, paths = index.len(), "generated command index");
    Ok(index)
}

fn add_subcommands(index: &mut InMemoryIndex, path: &str, commands: &[CommandSpec]) -> Result<()> {
    let mut seen = HashSet::new();

    for command in commands {
        check_name(path, &command.name)?;
        if !seen.insert(command.name.as_str()) {
            return Err(IndexError::DuplicateCommand {
                path: path.to_string(),
                name: command.name.clone(),
            }
            .into());
        }

        index.entry_mut(path).children.push(command.name.clone());

        let child_path = format!("{path}{PATH_SEPARATOR}{}", command.name);
        index
            .entry_mut(&child_path)
            .parameters
            .extend(command.parameters.iter().cloned());

        add_subcommands(index, &child_path, &command.commands)?;
    }

    Ok(())
}

/// Names become path segments, so they must be non-empty single words
fn check_name(path: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.contains(PATH_SEPARATOR) || name.contains(char::is_whitespace) {
        return Err(IndexError::InvalidName {
            path: path.to_string(),
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Load and flatten an index file (`.toml` or `.json`)
pub fn load_index_file(path: &Path) -> Result<LoadedIndex> {
    if !path.exists() {
        return Err(IndexError::FileNotFound(path.display().to_string()).into());
    }

    let content = fs::read_to_string(path)?;
    let spec = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => IndexSpec::from_toml_str(&content)?,
        Some("json") => IndexSpec::from_json_str(&content)?,
        _ => return Err(IndexError::UnsupportedFormat(path.display().to_string()).into()),
    };

    tracing::debug!(path = %path.display(), "loaded index file");
    spec.build()
}
