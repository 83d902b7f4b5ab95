//! Configuration management for cmdcomplete
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration files (TOML format)
//! - Environment variables
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the index path
pub const INDEX_ENV_VAR: &str = "CMDCOMPLETE_INDEX";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Command index configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// Completion pipeline configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command index configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path to the command tree file (`.toml` or `.json`)
    #[serde(default = "default_index_path")]
    pub path: PathBuf,
}

/// Completion pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Complete parameter values from the index's `[values]` table
    #[serde(default = "default_value_completion")]
    pub value_completion: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cmdcomplete")
}

fn default_index_path() -> PathBuf {
    config_dir().join("index.toml")
}

fn default_value_completion() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            value_completion: default_value_completion(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// Uses the default path when `path` is `None`. A missing default file
    /// yields the default configuration; a missing explicit file is an error.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path(),
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(INDEX_ENV_VAR).filter(|p| !p.is_empty()) {
            self.index.path = PathBuf::from(path);
        }
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.index.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "index.path".to_string(),
                value: String::new(),
            }
            .into());
        }
        Ok(())
    }

    /// Serialize the configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Generic(e.to_string()).into())
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompleteError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.index.path.ends_with(".cmdcomplete/index.toml"));
        assert!(config.completion.value_completion);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(!config.logging.timestamps);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
[index]
path = "/etc/cmdcomplete/aws.toml"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.index.path, PathBuf::from("/etc/cmdcomplete/aws.toml"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.completion.value_completion);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("[logging]\nlevel = \"loud\"");
        assert!(matches!(
            result,
            Err(CompleteError::Config(ConfigError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load_from_file(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(
            result,
            Err(CompleteError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_from(|key| (key == INDEX_ENV_VAR).then(|| "/tmp/idx.json".to_string()));
        assert_eq!(config.index.path, PathBuf::from("/tmp/idx.json"));

        let mut config = Config::default();
        config.apply_env_from(|_| Some(String::new()));
        assert_eq!(config.index.path, default_index_path());
    }

    #[test]
    fn test_validate_rejects_empty_index_path() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.index.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("cmdcomplete-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.completion.value_completion = false;
        config.logging.level = LogLevel::Trace;
        config.save(&path).unwrap();

        let reloaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(reloaded, config);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
