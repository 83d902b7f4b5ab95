//! Command index for completion lookups
//!
//! The index maps a dotted command path (`""`, `"aws"`, `"aws.ec2"`, ...) to
//! the child command names and parameter names valid at that path. The empty
//! path is the root: its children are the top-level programs and its
//! parameters are global, visible at every level.
//!
//! The index is built once at startup and only read while completing, so it
//! is shared behind an `Arc<dyn CommandIndex>` without locking.
//!
//! # Examples
//!
//! ```
//! use cmdcomplete::index::{CommandIndex, InMemoryIndex};
//!
//! let index = InMemoryIndex::new()
//!     .with_children("", ["aws"])
//!     .with_children("aws", ["ec2", "ecs", "s3"])
//!     .with_parameters("", ["region"]);
//!
//! assert_eq!(index.children_of("aws"), ["ec2", "ecs", "s3"]);
//! assert_eq!(index.parameters_of(""), ["region"]);
//! assert!(index.children_of("aws.s3").is_empty());
//! ```

pub mod generator;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use generator::{CommandSpec, IndexSpec, LoadedIndex, load_index_file};

/// Separator used when joining a lineage into a command path
pub const PATH_SEPARATOR: &str = ".";

/// Path of the root entry holding global parameters
pub const ROOT_PATH: &str = "";

/// Read-only lookup consumed by the parser and the completers
pub trait CommandIndex: Send + Sync {
    /// Child command names valid at `path`, in index order
    fn children_of(&self, path: &str) -> &[String];

    /// Parameter names (without the `--` marker) valid at `path`, in index order
    fn parameters_of(&self, path: &str) -> &[String];
}

/// Join lineage segments into an index path
pub fn path_of<S: AsRef<str>>(lineage: &[S]) -> String {
    lineage
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// One entry of the index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Child command names
    #[serde(default)]
    pub children: Vec<String>,

    /// Parameter names
    #[serde(default)]
    pub parameters: Vec<String>,
}

/// `HashMap` backed command index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryIndex {
    #[serde(default)]
    commands: HashMap<String, IndexEntry>,
}

impl InMemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append child command names to the entry at `path`
    pub fn with_children<I, S>(mut self, path: &str, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_mut(path)
            .children
            .extend(children.into_iter().map(Into::into));
        self
    }

    /// Append parameter names to the entry at `path`
    pub fn with_parameters<I, S>(mut self, path: &str, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_mut(path)
            .parameters
            .extend(parameters.into_iter().map(Into::into));
        self
    }

    /// Get or create the entry at `path`
    pub fn entry_mut(&mut self, path: &str) -> &mut IndexEntry {
        self.commands.entry(path.to_string()).or_default()
    }

    /// Look up the entry at `path`
    pub fn entry(&self, path: &str) -> Option<&IndexEntry> {
        self.commands.get(path)
    }

    /// Number of command paths in the index
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the index has no entries
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandIndex for InMemoryIndex {
    fn children_of(&self, path: &str) -> &[String] {
        self.commands
            .get(path)
            .map(|entry| entry.children.as_slice())
            .unwrap_or_default()
    }

    fn parameters_of(&self, path: &str) -> &[String] {
        self.commands
            .get(path)
            .map(|entry| entry.parameters.as_slice())
            .unwrap_or_default()
    }
}
