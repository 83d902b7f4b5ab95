//! Completion of parameter values from a fixed set of choices

use std::collections::HashMap;

use super::{Completer, Completion, filter_by_prefix};
use crate::parser::ParsedResult;

/// Completes the value of the parameter being typed from known choices
///
/// Claims a request only when the parser reports a `current_param` that has
/// choices configured; every other request is declined so the next strategy
/// can take it.
#[derive(Debug, Clone, Default)]
pub struct ParamValueCompleter {
    choices: HashMap<String, Vec<String>>,
}

impl ParamValueCompleter {
    /// Create a completer from `parameter name -> choices`
    pub fn new(choices: HashMap<String, Vec<String>>) -> Self {
        Self { choices }
    }

    /// Add choices for one parameter
    pub fn with_choices<I, S>(mut self, param: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices
            .entry(param.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

impl Completer for ParamValueCompleter {
    fn name(&self) -> &str {
        "param-value"
    }

    fn complete(&self, parsed: &ParsedResult) -> Completion {
        if !parsed.is_completable() {
            return Completion::Declined;
        }
        let (Some(param), Some(fragment)) = (&parsed.current_param, &parsed.last_fragment) else {
            return Completion::Declined;
        };

        self.choices
            .get(param)
            .map(|values| filter_by_prefix(values, fragment))
            .into()
    }
}
