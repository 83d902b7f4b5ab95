//! Completion engine - orchestrates the completion flow
//!
//! Parses the line once, then asks each strategy in order. The first strategy
//! that does not decline owns the request, even when its answer is empty.

use std::sync::Arc;

use super::{Completer, ModelIndexCompleter, ParamValueCompleter};
use crate::index::LoadedIndex;
use crate::parser::CliParser;

/// Main completion engine
pub struct AutoCompleter {
    /// Parser producing the structured view of the line
    parser: CliParser,
    /// Strategies, consulted in order
    completers: Vec<Box<dyn Completer>>,
}

impl AutoCompleter {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `parser` - Parser used once per request
    /// * `completers` - Strategies, highest precedence first
    pub fn new(parser: CliParser, completers: Vec<Box<dyn Completer>>) -> Self {
        Self { parser, completers }
    }

    /// Build the default pipeline over a loaded index
    ///
    /// Value choices, when `value_completion` is enabled, come before
    /// names from the index.
    pub fn from_loaded(loaded: LoadedIndex, value_completion: bool) -> Self {
        let index = Arc::new(loaded.index);
        let mut completers: Vec<Box<dyn Completer>> = Vec::new();
        if value_completion {
            completers.push(Box::new(ParamValueCompleter::new(loaded.values)));
        }
        completers.push(Box::new(ModelIndexCompleter::new(index.clone())));

        Self::new(CliParser::new(index), completers)
    }

    /// The parser used by this engine
    pub fn parser(&self) -> &CliParser {
        &self.parser
    }

    /// Complete `raw_line` at `cursor_position` (byte offset; end of line if `None`)
    ///
    /// # Returns
    /// * `Vec<String>` - Candidates of the first non-declining strategy, or
    ///   an empty list when every strategy declines
    pub fn autocomplete(&self, raw_line: &str, cursor_position: Option<usize>) -> Vec<String> {
        let parsed = self.parser.parse(raw_line, cursor_position);

        for completer in &self.completers {
            if let Some(candidates) = completer.complete(&parsed).into_candidates() {
                tracing::debug!(
                    line = raw_line,
                    cursor = ?cursor_position,
                    completer = completer.name(),
                    count = candidates.len(),
                    "completion claimed"
                );
                return candidates;
            }
        }

        tracing::debug!(
            line = raw_line,
            cursor = ?cursor_position,
            "every completer declined"
        );
        Vec::new()
    }
}
