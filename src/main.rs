//! cmdcomplete - shell completion for multi-level command-line tools
//!
//! Reads a command index describing a program's subcommands and parameters,
//! and answers completion requests from bash, zsh and fish.
//!
//! # Usage
//!
//! ```bash
//! # Install the hook for the program named in the index
//! eval "$(cmdcomplete completion bash)"
//!
//! # Ask for candidates directly
//! cmdcomplete complete --line "aws ec2 describe-"
//! ```

use cmdcomplete::cli::CliInterface;
use cmdcomplete::error::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Run the selected subcommand
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    cli.run()
}

/// Initialize logging system from the effective configuration
///
/// Logs go to stderr; stdout carries completion candidates. `RUST_LOG`
/// directives take precedence over the configured level.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(level, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

/// Build the log filter: `directives` if given, else `level`
fn log_filter(level: tracing::Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}
