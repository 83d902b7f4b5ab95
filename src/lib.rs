//! Index-driven shell completion
//!
//! This library completes partially typed command lines for programs with
//! nested subcommands, using a read-only index of each command's children
//! and parameters.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and shell integration scripts
//! - `completion`: Completion strategies and the engine that runs them
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `index`: Command index and its file format
//! - `parser`: Command line parsing
//!
//! # Example
//!
//! ```
//! use cmdcomplete::index::IndexSpec;
//! use cmdcomplete::AutoCompleter;
//!
//! let spec = IndexSpec::from_toml_str(
//!     r#"
//! name = "aws"
//! parameters = ["region"]
//!
//! [[commands]]
//! name = "ec2"
//!
//! [[commands]]
//! name = "ecs"
//! "#,
//! )?;
//! let engine = AutoCompleter::from_loaded(spec.build()?, true);
//!
//! assert_eq!(engine.autocomplete("aws e", None), vec!["ec2", "ecs"]);
//! assert_eq!(engine.autocomplete("aws --r", None), vec!["--region"]);
//! # Ok::<(), cmdcomplete::CompleteError>(())
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod index;
pub mod parser;

// Re-export commonly used types
pub use completion::{AutoCompleter, Completer, Completion};
pub use config::Config;
pub use error::{CompleteError, Result};
pub use index::{CommandIndex, InMemoryIndex};
pub use parser::{CliParser, ParsedResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
