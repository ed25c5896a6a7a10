//! List dataset model types and JSON I/O.
//!
//! This crate defines the on-disk data model (levels, records, editors, packs,
//! and the user name table) without any resolution or validation policy.
//! `listkeeper-lib` builds the resolver and validator on top of it.

pub mod json;
pub mod types;

pub use json::{
    DataDir, DataError, EDITORS_FILE, JsonDoc, LEVEL_LIST_FILE, NAME_TABLE_FILE, PACK_LIST_FILE,
    read_json, read_json_doc, write_json, write_json_doc,
};
pub use types::*;
