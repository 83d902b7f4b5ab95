//! Command-line interface for cmdcomplete
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Loading the command index and building the completion engine
//! - Dispatching the `complete`, `parse`, `config`, `completion` and
//!   `version` subcommands
//!
//! Shells drive completion through `complete`, which reads the line and
//! cursor from `COMP_LINE`/`COMP_POINT` when they are not passed explicitly.

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::completion::AutoCompleter;
use crate::config::{Config, LogLevel};
use crate::error::{CompleteError, ConfigError, Result};
use crate::index::{CommandIndex, LoadedIndex, ROOT_PATH, load_index_file};

/// Environment variable holding the line being completed
pub const COMP_LINE_VAR: &str = "COMP_LINE";

/// Environment variable holding the cursor offset
pub const COMP_POINT_VAR: &str = "COMP_POINT";

/// Command-line completion engine driven by a command index
#[derive(Parser, Debug)]
#[command(
    name = "cmdcomplete",
    version,
    about = "Shell completion for multi-level command-line tools",
    long_about = "Completes subcommands, parameter names and parameter values for a
command-line tool described by a command index file."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Command index file (.toml or .json)
    #[arg(short = 'i', long = "index", value_name = "FILE", global = true)]
    pub index: Option<PathBuf>,

    /// Do not complete parameter values
    #[arg(long = "no-values", global = true)]
    pub no_values: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for cmdcomplete
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completion candidates, one per line
    Complete {
        /// Line to complete (defaults to $COMP_LINE)
        #[arg(long, value_name = "LINE")]
        line: Option<String>,

        /// Cursor byte offset (defaults to $COMP_POINT, then end of line)
        #[arg(long, value_name = "OFFSET")]
        point: Option<usize>,

        /// Words appended by `complete -C`; the line is read from the environment instead
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        shell_words: Vec<String>,
    },

    /// Print the parse result for a line as JSON
    Parse {
        /// Line to parse (defaults to $COMP_LINE)
        #[arg(long, value_name = "LINE")]
        line: Option<String>,

        /// Cursor byte offset (defaults to $COMP_POINT, then end of line)
        #[arg(long, value_name = "OFFSET")]
        point: Option<usize>,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Generate the shell hook that wires a program to `cmdcomplete complete`
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,

        /// Program to register (defaults to the program named in the index)
        #[arg(long, value_name = "NAME")]
        program: Option<String>,
    },

    /// Show version information
    Version,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with environment and arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match Config::load_from_file(args.config_file.as_deref()) {
            Ok(config) => config,
            Err(CompleteError::Config(e @ ConfigError::InvalidFormat(_))) => {
                eprintln!("Warning: Failed to parse configuration: {}", e);
                eprintln!("Using default configuration instead.");
                Config::default()
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        config.apply_env();
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Override configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(index) = &args.index {
            config.index.path = index.clone();
        }

        if args.no_values {
            config.completion.value_completion = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the selected subcommand
    pub fn run(&self) -> Result<()> {
        match &self.args.command {
            Commands::Complete { line, point, .. } => {
                let (line, point) = Self::resolve_line(line.as_deref(), *point);
                for candidate in self.build_engine()?.autocomplete(&line, point) {
                    println!("{}", candidate);
                }
                Ok(())
            }
            Commands::Parse { line, point } => {
                let (line, point) = Self::resolve_line(line.as_deref(), *point);
                let parsed = self.build_engine()?.parser().parse(&line, point);
                let json = serde_json::to_string_pretty(&parsed)
                    .map_err(|e| CompleteError::Generic(format!("JSON error: {e}")))?;
                println!("{}", json);
                Ok(())
            }
            Commands::Config { show, validate } => self.handle_config_command(*show, *validate),
            Commands::Completion { shell, program } => {
                let program = match program {
                    Some(program) => program.clone(),
                    None => self.indexed_program()?,
                };
                completion::generate_completion(shell, &program)
            }
            Commands::Version => {
                self.show_version();
                Ok(())
            }
        }
    }

    /// Load the configured index
    fn load_index(&self) -> Result<LoadedIndex> {
        load_index_file(&self.config.index.path)
    }

    /// Load the index and assemble the completion pipeline
    pub fn build_engine(&self) -> Result<AutoCompleter> {
        let loaded = self.load_index()?;
        Ok(AutoCompleter::from_loaded(
            loaded,
            self.config.completion.value_completion,
        ))
    }

    /// Name of the program at the root of the index
    fn indexed_program(&self) -> Result<String> {
        let loaded = self.load_index()?;
        loaded
            .index
            .children_of(ROOT_PATH)
            .first()
            .cloned()
            .ok_or_else(|| CompleteError::Generic("Index names no program".to_string()))
    }

    /// Explicit line and cursor win over the shell environment
    fn resolve_line(line: Option<&str>, point: Option<usize>) -> (String, Option<usize>) {
        Self::resolve_line_from(line, point, |key| std::env::var(key).ok())
    }

    fn resolve_line_from(
        line: Option<&str>,
        point: Option<usize>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (String, Option<usize>) {
        match line {
            Some(line) => (line.to_string(), point),
            None => {
                let line = lookup(COMP_LINE_VAR).unwrap_or_default();
                let point = point.or_else(|| {
                    lookup(COMP_POINT_VAR).and_then(|p| p.trim().parse::<usize>().ok())
                });
                (line, point)
            }
        }
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return Ok(());
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Show version information
    fn show_version(&self) {
        println!("cmdcomplete version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_complete_args() {
        let args = parse_args(&["cmdcomplete", "complete", "--line", "aws e", "--point", "5"]);
        match args.command {
            Commands::Complete { line, point, shell_words } => {
                assert_eq!(line.as_deref(), Some("aws e"));
                assert_eq!(point, Some(5));
                assert!(shell_words.is_empty());
            }
            other => panic!("Expected Complete, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_accepts_shell_words() {
        // bash `complete -C` appends: command name, current word, previous word
        let args = parse_args(&["cmdcomplete", "complete", "aws", "--re", "aws"]);
        match args.command {
            Commands::Complete { line, shell_words, .. } => {
                assert!(line.is_none());
                assert_eq!(shell_words, vec!["aws", "--re", "aws"]);
            }
            other => panic!("Expected Complete, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse_args(&["cmdcomplete", "parse", "--line", "aws ", "-i", "idx.json", "-v"]);
        assert_eq!(args.index, Some(PathBuf::from("idx.json")));
        assert!(args.verbose);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["cmdcomplete"]).is_err());
    }

    #[test]
    fn test_apply_args_to_config() {
        let args = parse_args(&["cmdcomplete", "--vv", "--no-values", "-i", "x.toml", "version"]);
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.logging.level, LogLevel::Trace);
        assert!(!config.completion.value_completion);
        assert_eq!(config.index.path, PathBuf::from("x.toml"));
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let args = parse_args(&["cmdcomplete", "-q", "version"]);
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    fn write_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cmdcomplete-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let path = write_config("bad-level.toml", "[logging]\nlevel = \"loud\"\n");
        let args = parse_args(&["cmdcomplete", "-c", path.to_str().unwrap(), "version"]);

        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.config().logging.level, LogLevel::Warn);
        assert!(cli.config().completion.value_completion);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unparsable_config_falls_back_to_defaults() {
        let path = write_config("broken.toml", "[index\npath = ");
        let args = parse_args(&["cmdcomplete", "-c", path.to_str().unwrap(), "-q", "version"]);

        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.config().logging.level, LogLevel::Error);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = parse_args(&["cmdcomplete", "-c", "/no/such/cmdcomplete.toml", "version"]);
        assert!(matches!(
            CliInterface::from_args(args),
            Err(CompleteError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_resolve_line_prefers_explicit() {
        let (line, point) =
            CliInterface::resolve_line_from(Some("aws e"), None, |_| Some("ignored".to_string()));
        assert_eq!(line, "aws e");
        assert_eq!(point, None);
    }

    #[test]
    fn test_resolve_line_from_environment() {
        let env = |key: &str| match key {
            COMP_LINE_VAR => Some("aws ec2 ".to_string()),
            COMP_POINT_VAR => Some("4".to_string()),
            _ => None,
        };
        let (line, point) = CliInterface::resolve_line_from(None, None, env);
        assert_eq!(line, "aws ec2 ");
        assert_eq!(point, Some(4));

        let (_, point) = CliInterface::resolve_line_from(None, Some(2), env);
        assert_eq!(point, Some(2));
    }

    #[test]
    fn test_resolve_line_ignores_bad_point() {
        let env = |key: &str| match key {
            COMP_LINE_VAR => Some("aws".to_string()),
            COMP_POINT_VAR => Some("nope".to_string()),
            _ => None,
        };
        let (line, point) = CliInterface::resolve_line_from(None, None, env);
        assert_eq!(line, "aws");
        assert_eq!(point, None);
    }

    #[test]
    fn test_resolve_line_without_environment() {
        let (line, point) = CliInterface::resolve_line_from(None, None, |_| None);
        assert_eq!(line, "");
        assert_eq!(point, None);
    }
}
