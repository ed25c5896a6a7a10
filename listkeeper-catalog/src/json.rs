//! JSON loading and saving for the list data directory.
//!
//! All files live flat in one directory:
//! ```text
//! data/
//!   _list.json        ordered level filenames
//!   _packlist.json    packs
//!   _name_map.json    user ID -> display name
//!   _editors.json     list editors
//!   <level>.json      one file per entry in _list.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::types::{Editor, Level, NameTable, Pack};

pub const LEVEL_LIST_FILE: &str = "_list.json";
pub const PACK_LIST_FILE: &str = "_packlist.json";
pub const NAME_TABLE_FILE: &str = "_name_map.json";
pub const EDITORS_FILE: &str = "_editors.json";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error reading {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("I/O error writing {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("Invalid json in file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Validation failed for {path}: {source}")]
    Shape {
        path: String,
        source: serde_json::Error,
    },
    #[error("Missing file {0}")]
    NotFound(String),
}

impl DataError {
    /// Whether this error means the file does not exist at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }

    fn from_json(path: &Path, source: serde_json::Error) -> Self {
        let path = path.display().to_string();
        match source.classify() {
            serde_json::error::Category::Data => DataError::Shape { path, source },
            _ => DataError::Parse { path, source },
        }
    }
}

/// Handle to a data directory and its well-known files.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a level file given its `_list.json` entry (no extension).
    pub fn level_path(&self, filename: &str) -> PathBuf {
        self.root.join(format!("{filename}.json"))
    }

    pub fn load_level_list(&self) -> Result<Vec<String>, DataError> {
        read_json(&self.root.join(LEVEL_LIST_FILE))
    }

    pub fn load_pack_list(&self) -> Result<Vec<Pack>, DataError> {
        read_json(&self.root.join(PACK_LIST_FILE))
    }

    pub fn load_name_table(&self) -> Result<NameTable, DataError> {
        read_json(&self.root.join(NAME_TABLE_FILE))
    }

    pub fn load_editors(&self) -> Result<Vec<Editor>, DataError> {
        read_json(&self.root.join(EDITORS_FILE))
    }

    pub fn load_level(&self, filename: &str) -> Result<Level, DataError> {
        read_json(&self.level_path(filename))
    }

    /// Load the editor list for rewriting. See [`JsonDoc`].
    pub fn load_editors_doc(&self) -> Result<JsonDoc<Vec<Editor>>, DataError> {
        read_json_doc(&self.root.join(EDITORS_FILE))
    }

    /// Load a level for rewriting. See [`JsonDoc`].
    pub fn load_level_doc(&self, filename: &str) -> Result<JsonDoc<Level>, DataError> {
        read_json_doc(&self.level_path(filename))
    }

    /// Persist the name table. Returns `true` if the file changed.
    pub fn save_name_table(&self, table: &NameTable) -> Result<bool, DataError> {
        write_json(&self.root.join(NAME_TABLE_FILE), table)
    }

    pub fn save_editors(&self, editors: &JsonDoc<Vec<Editor>>) -> Result<bool, DataError> {
        write_json_doc(&self.root.join(EDITORS_FILE), editors)
    }

    pub fn save_level(&self, filename: &str, level: &JsonDoc<Level>) -> Result<bool, DataError> {
        write_json_doc(&self.level_path(filename), level)
    }
}

/// A typed value together with the JSON it was parsed from.
///
/// Saving a `JsonDoc` lays the typed value back over the source tree, so
/// objects keep the key order they had on disk and only the values that
/// actually changed differ in the output.
#[derive(Debug, Clone)]
pub struct JsonDoc<T> {
    pub data: T,
    source: Value,
}

impl<T: Serialize> JsonDoc<T> {
    /// The typed value rendered as JSON in the source's key order.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        Ok(overlay(&self.source, serde_json::to_value(&self.data)?))
    }
}

/// Merge `updated` into the shape of `source`.
///
/// Object keys present in both keep the source position; keys only in
/// `updated` are appended; keys missing from `updated` are dropped. Arrays of
/// equal length are merged element-wise.
fn overlay(source: &Value, updated: Value) -> Value {
    match (source, updated) {
        (Value::Object(old), Value::Object(mut new)) => {
            let mut merged = serde_json::Map::with_capacity(new.len());
            for (key, old_value) in old {
                if let Some(new_value) = new.remove(key) {
                    merged.insert(key.clone(), overlay(old_value, new_value));
                }
            }
            merged.extend(new);
            Value::Object(merged)
        }
        (Value::Array(old), Value::Array(new)) if old.len() == new.len() => Value::Array(
            old.iter()
                .zip(new)
                .map(|(old_value, new_value)| overlay(old_value, new_value))
                .collect(),
        ),
        (_, updated) => updated,
    }
}

/// Read and deserialize a single JSON file.
///
/// A missing file maps to [`DataError::NotFound`], malformed JSON to
/// [`DataError::Parse`], and well-formed JSON of the wrong shape to
/// [`DataError::Shape`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Err(e) => {
            return Err(DataError::Read {
                path: path.display().to_string(),
                source: e,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|e| DataError::from_json(path, e))
}

/// Like [`read_json`], but keeps the parsed source for an order-preserving
/// rewrite.
pub fn read_json_doc<T: DeserializeOwned>(path: &Path) -> Result<JsonDoc<T>, DataError> {
    let source: Value = read_json(path)?;
    let data = T::deserialize(&source).map_err(|e| DataError::from_json(path, e))?;
    Ok(JsonDoc { data, source })
}

/// Write a [`JsonDoc`] with [`write_json`] semantics.
pub fn write_json_doc<T: Serialize>(path: &Path, doc: &JsonDoc<T>) -> Result<bool, DataError> {
    let value = doc.to_value().map_err(|e| DataError::Write {
        path: path.display().to_string(),
        source: io::Error::other(e),
    })?;
    write_json(path, &value)
}

/// Render a value the way the data files are stored: tab indentation,
/// non-ASCII text left unescaped, no trailing newline.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `value` to `path`, skipping the write when the file already
/// holds exactly that content. Returns `true` if the file was written.
///
/// Writes go to a temporary sibling first and are renamed into place.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool, DataError> {
    let write_err = |source: io::Error| DataError::Write {
        path: path.display().to_string(),
        source,
    };

    let serialized = to_json_string(value).map_err(|e| write_err(io::Error::other(e)))?;

    if let Ok(existing) = fs::read_to_string(path) {
        if existing == serialized {
            return Ok(false);
        }
    }

    let tmp = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp, &serialized).and_then(|()| fs::rename(&tmp, path)) {
        // best effort: the tmp path may be a directory we did not create
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(true)
}
