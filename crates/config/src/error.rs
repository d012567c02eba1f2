//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define the fatal errors surfaced to callers of `load` and `parse_config_file`.
//! - Define the recoverable errors a parser hits while reading a single file.
//!
//! Invariants:
//! - `ParseError` never escapes a parser: it is logged and replaced by an empty tree.
//! - `ConfigError` signals a caller configuration mistake, not absent data.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a load.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("file type not supported: path({})", .path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("Unable to determine working directory: {0}")]
    WorkingDirUnavailable(#[source] std::io::Error),
}

/// Recoverable errors raised while parsing a single configuration file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read config file at {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not produce an object (found: {found})", .path.display())]
    NotAnObject { path: PathBuf, found: String },

    #[error("Failed to evaluate module {}: {message}", .path.display())]
    ModuleEvaluation { path: PathBuf, message: String },
}

impl ParseError {
    /// Whether the error only means the file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ParseError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
