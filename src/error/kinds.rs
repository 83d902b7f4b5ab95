use std::{fmt, io};

/// Crate-wide `Result` type using [`CompleteError`] as the error.
///
/// Completion itself never fails; this alias covers loading the
/// configuration and the command index.
pub type Result<T> = std::result::Result<T, CompleteError>;

/// Top-level error type for cmdcomplete operations.
#[derive(Debug)]
pub enum CompleteError {
    /// Configuration errors.
    Config(ConfigError),

    /// Command index errors.
    Index(IndexError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/// Command index errors.
#[derive(Debug)]
pub enum IndexError {
    /// Index file not found.
    FileNotFound(String),

    /// Index file extension is neither `.toml` nor `.json`.
    UnsupportedFormat(String),

    /// Index file could not be deserialized.
    InvalidFormat(String),

    /// Command name cannot be used as a path segment.
    InvalidName { path: String, name: String },

    /// Two sibling commands share a name.
    DuplicateCommand { path: String, name: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for CompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompleteError::Config(e) => write!(f, "Configuration error: {e}"),
            CompleteError::Index(e) => write!(f, "Index error: {e}"),
            CompleteError::Io(e) => write!(f, "I/O error: {e}"),
            CompleteError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::FileNotFound(path) => write!(f, "Index file not found: {path}"),
            IndexError::UnsupportedFormat(path) => {
                write!(f, "Unsupported index format (expected .toml or .json): {path}")
            }
            IndexError::InvalidFormat(msg) => write!(f, "Invalid index format: {msg}"),
            IndexError::InvalidName { path, name } => {
                write!(f, "Invalid command name '{name}' under '{path}'")
            }
            IndexError::DuplicateCommand { path, name } => {
                write!(f, "Duplicate command '{name}' under '{path}'")
            }
        }
    }
}

impl std::error::Error for CompleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompleteError::Config(e) => Some(e),
            CompleteError::Index(e) => Some(e),
            CompleteError::Io(e) => Some(e),
            CompleteError::Generic(_) => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for IndexError {}

/* ========================= Conversions to CompleteError ========================= */

impl From<io::Error> for CompleteError {
    fn from(err: io::Error) -> Self {
        CompleteError::Io(err)
    }
}

impl From<ConfigError> for CompleteError {
    fn from(err: ConfigError) -> Self {
        CompleteError::Config(err)
    }
}

impl From<IndexError> for CompleteError {
    fn from(err: IndexError) -> Self {
        CompleteError::Index(err)
    }
}

impl From<String> for CompleteError {
    fn from(msg: String) -> Self {
        CompleteError::Generic(msg)
    }
}

impl From<&str> for CompleteError {
    fn from(msg: &str) -> Self {
        CompleteError::Generic(msg.to_owned())
    }
}
