//! Name resolution and integrity validation for the list dataset.
//!
//! Two passes share the on-disk data model from `listkeeper-catalog`:
//! [`rewrite::resolve_dataset`] replaces raw user names with stable IDs, and
//! [`validator::validate_dir`] checks the result before it is published.

pub mod error;
pub mod resolver;
pub mod rewrite;
pub mod settings;
pub mod validator;

pub use error::{ResolveError, ValidateError};
pub use listkeeper_catalog::{DataDir, DataError, NameTable, UserRef};
pub use resolver::{ID_DIGITS, IdRange, IdentityResolver};
pub use rewrite::{
    ResolveOptions, ResolveReport, ResolveStats, SkippedLevel, resolve_dataset,
    resolve_dataset_with,
};
pub use validator::{
    Dataset, LevelSource, ValidationReport, Violation, is_valid_url, validate, validate_dir,
};
