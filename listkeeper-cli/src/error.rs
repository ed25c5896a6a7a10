use listkeeper_lib::{DataError, ResolveError, ValidateError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A data file could not be read or parsed
    #[error("{0}")]
    Data(#[from] DataError),

    /// Name resolution aborted
    #[error("Resolve failed: {0}")]
    Resolve(#[from] ResolveError),

    /// A master file could not be loaded for validation
    #[error("{0}")]
    Validate(#[from] ValidateError),

    /// The dataset loaded but has integrity violations
    #[error("Validation found {0} problem(s)")]
    Violations(usize),

    /// A lookup matched nothing
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
