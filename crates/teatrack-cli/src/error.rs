//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use teatrack_core::{CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// The requested profile does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Conflict(msg) | CoreError::Forbidden(msg) | CoreError::Internal(msg) => {
                Self::Core(msg)
            }
            CoreError::Unauthenticated(auth) => Self::Config(auth.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbling out of `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teatrack_core::RepositoryError;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let missing = CliError::from(CoreError::NotFound("Profile with ID 4".into()));
        assert_eq!(missing.exit_code(), 66);
        assert_eq!(missing.to_string(), "Profile with ID 4 not found");

        let storage = CliError::from(CoreError::from(RepositoryError::Storage("locked".into())));
        assert_eq!(storage.exit_code(), 73);

        let invalid = CliError::from(CoreError::Validation("bad".into()));
        assert_eq!(invalid.exit_code(), 2);
    }

    #[test]
    fn exit_code_found_through_anyhow_context() {
        let err = anyhow::Error::new(CliError::Config("no secret".into())).context("serving");
        assert_eq!(exit_code_for(&err), 78);
        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }
}
