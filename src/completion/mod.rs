//! Completion pipeline
//!
//! Completion runs in two steps: the [`CliParser`](crate::parser::CliParser)
//! turns the raw line into a [`ParsedResult`], then an [`AutoCompleter`]
//! asks an ordered list of [`Completer`] strategies for candidates and
//! returns the answer of the first one that does not decline.
//!
//! # Architecture
//!
//! - **Completer**: one strategy, answering [`Completion::Declined`] or
//!   [`Completion::Candidates`]
//! - **ModelIndexCompleter**: subcommand and parameter names from the index
//! - **ParamValueCompleter**: value choices for the parameter being typed
//! - **AutoCompleter**: parses once, then applies the short-circuit policy
//!
//! An empty candidate list is a decisive answer ("no matches") and stops the
//! pipeline just like a non-empty one. Only `Declined` lets later strategies
//! run.
//!
//! # Examples
//!
//! ```
//! use cmdcomplete::completion::{AutoCompleter, ModelIndexCompleter};
//! use cmdcomplete::index::InMemoryIndex;
//! use cmdcomplete::parser::CliParser;
//! use std::sync::Arc;
//!
//! let index = Arc::new(
//!     InMemoryIndex::new()
//!         .with_children("", ["aws"])
//!         .with_children("aws", ["ec2", "ecs", "s3"]),
//! );
//! let completer = AutoCompleter::new(
//!     CliParser::new(index.clone()),
//!     vec![Box::new(ModelIndexCompleter::new(index))],
//! );
//!
//! assert_eq!(completer.autocomplete("aws e", None), vec!["ec2", "ecs"]);
//! ```

mod engine;
mod index_completer;
mod value_completer;


pub use engine::AutoCompleter;
pub use index_completer::ModelIndexCompleter;
pub use value_completer::ParamValueCompleter;

use crate::parser::ParsedResult;

/// Answer of a single completion strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The strategy has no opinion; later strategies are consulted
    Declined,

    /// Decisive answer, possibly empty
    Candidates(Vec<String>),
}

impl Completion {
    /// Check if the strategy declined
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    /// Candidates, or `None` when declined
    pub fn into_candidates(self) -> Option<Vec<String>> {
        match self {
            Self::Declined => None,
            Self::Candidates(candidates) => Some(candidates),
        }
    }
}

impl From<Option<Vec<String>>> for Completion {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map_or(Self::Declined, Self::Candidates)
    }
}

/// A completion strategy
pub trait Completer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Propose candidates for `parsed`, or decline
    fn complete(&self, parsed: &ParsedResult) -> Completion;
}

/// Items starting with `prefix`, in input order, without duplicates
fn filter_by_prefix<'a, I>(items: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut filtered: Vec<String> = Vec::new();
    for item in items {
        if item.starts_with(prefix) && !filtered.contains(item) {
            filtered.push(item.clone());
        }
    }
    filtered
}
