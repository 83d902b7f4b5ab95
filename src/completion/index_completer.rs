//! Index-backed completion of subcommand and parameter names

use std::sync::Arc;

use super::{Completer, Completion, filter_by_prefix};
use crate::index::{CommandIndex, ROOT_PATH};
use crate::parser::{OPTION_PREFIX, ParsedResult};

/// Completes child command names and `--parameter` names from a
/// [`CommandIndex`]
///
/// Declines when the parse result is not completable, and when the fragment
/// is the value of a parameter (the parser binds that word as the value).
/// Prefix matching is exact and case-sensitive, and candidates keep the
/// index order.
pub struct ModelIndexCompleter {
    index: Arc<dyn CommandIndex>,
}

impl ModelIndexCompleter {
    /// Create a completer over `index`
    pub fn new(index: Arc<dyn CommandIndex>) -> Self {
        Self { index }
    }

    /// Child commands of the current command matching `prefix`
    fn complete_command(&self, parsed: &ParsedResult, prefix: &str) -> Vec<String> {
        filter_by_prefix(self.index.children_of(&parsed.current_command), prefix)
    }

    /// Local then global parameters matching `prefix`, minus those already bound
    fn complete_parameter(&self, parsed: &ParsedResult, prefix: &str) -> Vec<String> {
        let local = self.index.parameters_of(&parsed.current_command);
        let global: &[String] = if parsed.current_command == ROOT_PATH {
            &[]
        } else {
            self.index.parameters_of(ROOT_PATH)
        };

        let unbound = local
            .iter()
            .chain(global)
            .filter(|name| !parsed.has_param(name));

        filter_by_prefix(unbound, prefix)
            .into_iter()
            .map(|name| format!("{OPTION_PREFIX}{name}"))
            .collect()
    }
}

impl Completer for ModelIndexCompleter {
    fn name(&self) -> &str {
        "model-index"
    }

    fn complete(&self, parsed: &ParsedResult) -> Completion {
        if !parsed.is_completable() || parsed.current_param.is_some() {
            return Completion::Declined;
        }
        let Some(fragment) = parsed.last_fragment.as_deref() else {
            return Completion::Declined;
        };

        let candidates = match fragment.strip_prefix(OPTION_PREFIX) {
            Some(prefix) => self.complete_parameter(parsed, prefix),
            None => self.complete_command(parsed, fragment),
        };
        Completion::Candidates(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InMemoryIndex;
    use crate::parser::CliParser;

    fn create_test_index() -> Arc<InMemoryIndex> {
        Arc::new(
            InMemoryIndex::new()
                .with_children("", ["aws"])
                .with_parameters("", ["region", "endpoint-url"])
                .with_children("aws", ["ec2", "ecs", "s3"])
                .with_children("aws.ec2", ["describe-instances"])
                .with_parameters("aws.ec2.describe-instances", ["instance-ids", "reserve"]),
        )
    }

    fn complete(line: &str) -> Completion {
        let index = create_test_index();
        let parser = CliParser::new(index.clone());
        ModelIndexCompleter::new(index).complete(&parser.parse(line, None))
    }

    fn candidates(items: &[&str]) -> Completion {
        Completion::Candidates(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_does_not_complete_if_unparsed_items() {
        assert_eq!(complete("aws foo "), Completion::Declined);
    }

    #[test]
    fn test_does_not_complete_if_last_fragment_is_none() {
        let parsed = ParsedResult {
            lineage: vec!["aws".to_string()],
            current_command: "aws".to_string(),
            last_fragment: None,
            ..Default::default()
        };
        let completer = ModelIndexCompleter::new(create_test_index());
        assert_eq!(completer.complete(&parsed), Completion::Declined);
    }

    #[test]
    fn test_does_not_complete_parameter_values() {
        assert_eq!(complete("aws --region "), Completion::Declined);
        assert_eq!(complete("aws --region us-"), Completion::Declined);
        assert_eq!(complete("aws --region ec2"), Completion::Declined);
    }

    #[test]
    fn test_parameter_marker_after_awaiting_parameter_completes_names() {
        assert_eq!(complete("aws --region --e"), candidates(&["--endpoint-url"]));
    }

    #[test]
    fn test_program_name_in_progress() {
        assert_eq!(complete("aws"), candidates(&["aws"]));
        assert_eq!(complete(""), candidates(&["aws"]));
    }

    #[test]
    fn test_can_prefix_match_services() {
        assert_eq!(complete("aws e"), candidates(&["ec2", "ecs"]));
    }

    #[test]
    fn test_returns_all_results_when_last_fragment_empty() {
        assert_eq!(complete("aws "), candidates(&["ec2", "ecs", "s3"]));
    }

    #[test]
    fn test_can_autocomplete_global_param() {
        assert_eq!(complete("aws --re"), candidates(&["--region"]));
    }

    #[test]
    fn test_can_combine_global_and_command_params() {
        assert_eq!(
            complete("aws ec2 describe-instances --r"),
            candidates(&["--reserve", "--region"])
        );
    }

    #[test]
    fn test_bare_marker_lists_all_parameters() {
        assert_eq!(
            complete("aws ec2 describe-instances --"),
            candidates(&["--instance-ids", "--reserve", "--region", "--endpoint-url"])
        );
    }

    #[test]
    fn test_bound_parameters_are_not_suggested() {
        assert_eq!(
            complete("aws --region us-west-2 ec2 describe-instances --r"),
            candidates(&["--reserve"])
        );
        assert_eq!(
            complete("aws ec2 describe-instances --reserve yes --r"),
            candidates(&["--region"])
        );
    }

    #[test]
    fn test_no_autocompletions_if_nothing_matches() {
        assert_eq!(complete("aws --foo"), candidates(&[]));
        assert_eq!(complete("aws x"), candidates(&[]));
    }

    #[test]
    fn test_leaf_command_has_no_children() {
        assert_eq!(complete("aws ec2 describe-instances "), candidates(&[]));
    }

    #[test]
    fn test_global_parameter_duplicated_locally_listed_once() {
        let index = Arc::new(
            InMemoryIndex::new()
                .with_children("", ["tool"])
                .with_parameters("", ["verbose", "region"])
                .with_parameters("tool", ["region", "force"]),
        );
        let parser = CliParser::new(index.clone());
        let completer = ModelIndexCompleter::new(index);

        let result = completer.complete(&parser.parse("tool --", None));
        assert_eq!(result, candidates(&["--region", "--force", "--verbose"]));
    }
}
