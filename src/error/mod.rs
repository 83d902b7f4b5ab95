//! Error handling for cmdcomplete.
//!
//! Completion requests never return errors: malformed input is reported as
//! data on the parse result and "no matches" is an empty candidate list.
//! The types here cover everything that happens before a request, namely
//! loading the configuration file and the command index.
//!
//! # Example
//!
//! ```rust,no_run
//! use cmdcomplete::error::{CompleteError, IndexError, Result};
//! use cmdcomplete::index::load_index_file;
//! use std::path::Path;
//!
//! fn load() -> Result<()> {
//!     match load_index_file(Path::new("index.toml")) {
//!         Err(CompleteError::Index(IndexError::FileNotFound(path))) => {
//!             eprintln!("no index at {path}");
//!             Ok(())
//!         }
//!         other => other.map(|_| ()),
//!     }
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CompleteError, ConfigError, IndexError, Result};
