use listkeeper_catalog::DataError;
use thiserror::Error;

use crate::resolver::IdRange;

/// Errors that abort a resolver run.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A master file could not be read, parsed, or written
    #[error(transparent)]
    Data(#[from] DataError),

    /// The name was empty after trimming whitespace
    #[error("Cannot resolve an empty user name")]
    EmptyName,

    /// Every draw collided with an existing ID
    #[error("No free user ID found in {range} after {attempts} attempts")]
    IdSpaceExhausted { range: IdRange, attempts: usize },
}

/// Errors that stop the validator before any cross-checks can run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A master file could not be read or parsed
    #[error(transparent)]
    Data(#[from] DataError),

    /// A master file parsed but does not hold resolved data
    #[error("Validation failed for {file}: {detail}")]
    Shape { file: String, detail: String },
}

impl ValidateError {
    pub fn shape(file: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Shape {
            file: file.into(),
            detail: detail.into(),
        }
    }
}
