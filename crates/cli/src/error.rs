//! CLI exit codes for scripting and automation.
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.

use enx_config::ConfigError;
use thiserror::Error;

/// Structured exit codes for enx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Configuration mistake, e.g. an unsupported file name template.
    ConfigError = 3,

    /// The requested path is not present in the merged configuration.
    NotFound = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Errors raised by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("No value at path '{0}'")]
    PathNotFound(String),
}

/// Extension trait to map errors to exit codes.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        match self.downcast_ref::<CliError>() {
            Some(CliError::Load(_)) => ExitCode::ConfigError,
            Some(CliError::PathNotFound(_)) => ExitCode::NotFound,
            None => ExitCode::GeneralError,
        }
    }
}
