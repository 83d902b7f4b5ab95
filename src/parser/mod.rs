//! Command-line parser for completion
//!
//! Turns a raw, possibly incomplete command line into a [`ParsedResult`]
//! describing what has been typed so far. The parser walks the words left to
//! right against a [`CommandIndex`]:
//!
//! - a word naming a child of the current command descends into it
//! - a `--name` word naming a known parameter binds it, together with the
//!   following word as its value unless that word is another `--` marker
//! - anything else is recorded as unparsed and the walk continues
//!
//! The word under the cursor is never classified; it becomes the fragment
//! that completers work on. Only words followed by a separator are resolved,
//! so `"aws"` without a trailing space is still in progress.
//!
//! Parsing never fails. Input that cannot be completed is described by an
//! absent fragment or by unparsed items.
//!
//! # Examples
//!
//! ```
//! use cmdcomplete::index::InMemoryIndex;
//! use cmdcomplete::parser::CliParser;
//! use std::sync::Arc;
//!
//! let index = InMemoryIndex::new()
//!     .with_children("", ["aws"])
//!     .with_children("aws", ["ec2", "s3"]);
//! let parser = CliParser::new(Arc::new(index));
//!
//! let parsed = parser.parse("aws e", None);
//! assert_eq!(parsed.lineage, vec!["aws"]);
//! assert_eq!(parsed.current_command, "aws");
//! assert_eq!(parsed.last_fragment.as_deref(), Some("e"));
//! ```

pub mod lexer;

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::index::{CommandIndex, ROOT_PATH, path_of};
use lexer::{Lexer, Token};

/// Marker that starts a parameter name
pub const OPTION_PREFIX: &str = "--";

/// Structured view of a partially typed command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    /// Resolved command names from the root
    pub lineage: Vec<String>,

    /// `lineage` joined into an index path; empty at the root
    pub current_command: String,

    /// Bound parameters (without the marker) and their values
    pub parsed_params: BTreeMap<String, Vec<String>>,

    /// Parameter whose value is being typed as the fragment
    pub current_param: Option<String>,

    /// Partial word at the cursor; `None` when nothing can be completed here
    pub last_fragment: Option<String>,

    /// Words that matched neither a command nor a known parameter
    pub unparsed_items: Vec<String>,
}

impl ParsedResult {
    /// Whether completers may suggest anything for this result
    pub fn is_completable(&self) -> bool {
        self.last_fragment.is_some() && self.unparsed_items.is_empty()
    }

    /// Whether `name` (without the marker) is already bound
    pub fn has_param(&self, name: &str) -> bool {
        self.parsed_params.contains_key(name)
    }
}

/// Index-driven command-line parser
#[derive(Clone)]
pub struct CliParser {
    index: Arc<dyn CommandIndex>,
}

impl CliParser {
    /// Create a parser reading commands and parameters from `index`
    pub fn new(index: Arc<dyn CommandIndex>) -> Self {
        Self { index }
    }

    /// Parse `raw_line` up to `cursor_position` (a byte offset; end of line if `None`)
    pub fn parse(&self, raw_line: &str, cursor_position: Option<usize>) -> ParsedResult {
        let cursor = clamp_cursor(raw_line, cursor_position);

        // The cursor touches a word that is already on the line.
        let on_existing_word = raw_line[cursor..]
            .chars()
            .next()
            .is_some_and(|ch| !ch.is_whitespace());

        let lexed = Lexer::tokenize(&raw_line[..cursor]);
        let (complete, fragment) = match lexed.tokens.split_last() {
            Some((last, rest)) if !lexed.at_separator => (rest, last.text.clone()),
            _ => (lexed.tokens.as_slice(), String::new()),
        };

        let mut walk = ParseWalk::new(self.index.as_ref());
        walk.run(complete);

        let fragment = (!on_existing_word).then_some(fragment);
        let parsed = walk.finish(fragment);

        tracing::trace!(
            line = raw_line,
            cursor,
            current_command = %parsed.current_command,
            fragment = ?parsed.last_fragment,
            unparsed = parsed.unparsed_items.len(),
            "parsed command line"
        );
        parsed
    }
}

/// Clamp the cursor to the line and back onto a char boundary
fn clamp_cursor(line: &str, cursor: Option<usize>) -> usize {
    let mut pos = cursor.map_or(line.len(), |c| c.min(line.len()));
    while !line.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// State of a single left-to-right walk
struct ParseWalk<'a> {
    index: &'a dyn CommandIndex,
    lineage: Vec<String>,
    current_command: String,
    parsed_params: BTreeMap<String, Vec<String>>,
    unparsed_items: Vec<String>,
    /// Known parameter that was the last complete word, still without a value
    awaiting_value: Option<String>,
}

impl<'a> ParseWalk<'a> {
    fn new(index: &'a dyn CommandIndex) -> Self {
        Self {
            index,
            lineage: Vec::new(),
            current_command: ROOT_PATH.to_string(),
            parsed_params: BTreeMap::new(),
            unparsed_items: Vec::new(),
            awaiting_value: None,
        }
    }

    fn run(&mut self, tokens: &[Token]) {
        let mut words = tokens.iter().peekable();

        while let Some(token) = words.next() {
            self.awaiting_value = None;
            let word = token.text.as_str();

            if let Some(name) = word.strip_prefix(OPTION_PREFIX) {
                if self.is_known_parameter(name) {
                    let value = words
                        .next_if(|next| !next.text.starts_with(OPTION_PREFIX))
                        .map(|next| next.text.clone());
                    if value.is_none() && words.peek().is_none() {
                        self.awaiting_value = Some(name.to_string());
                    }
                    self.bind(name, value);
                    continue;
                }
            } else if self.is_child_command(word) {
                self.descend(word);
                continue;
            }

            tracing::trace!(word, path = %self.current_command, "unparsed word");
            self.unparsed_items.push(token.text.clone());
        }
    }

    fn is_child_command(&self, word: &str) -> bool {
        self.index
            .children_of(&self.current_command)
            .iter()
            .any(|child| child == word)
    }

    fn is_known_parameter(&self, name: &str) -> bool {
        let local = self.index.parameters_of(&self.current_command);
        let global = self.index.parameters_of(ROOT_PATH);
        local.iter().chain(global).any(|param| param == name)
    }

    fn descend(&mut self, command: &str) {
        self.lineage.push(command.to_string());
        self.current_command = path_of(&self.lineage);
        tracing::trace!(path = %self.current_command, "descended into command");
    }

    fn bind(&mut self, name: &str, value: Option<String>) {
        tracing::trace!(param = name, value = ?value, "bound parameter");
        let values = self.parsed_params.entry(name.to_string()).or_default();
        values.extend(value);
    }

    fn finish(self, last_fragment: Option<String>) -> ParsedResult {
        let current_param = match (&self.awaiting_value, &last_fragment) {
            (Some(param), Some(fragment)) if !fragment.starts_with(OPTION_PREFIX) => {
                Some(param.clone())
            }
            _ => None,
        };

        ParsedResult {
            lineage: self.lineage,
            current_command: self.current_command,
            parsed_params: self.parsed_params,
            current_param,
            last_fragment,
            unparsed_items: self.unparsed_items,
        }
    }
}
