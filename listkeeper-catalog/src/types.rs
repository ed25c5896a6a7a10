//! Data model types for the list dataset.
//!
//! These types mirror the JSON files in the data directory: the name table,
//! the level list, individual level files, editors, and packs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ── User references ─────────────────────────────────────────────────────────

/// A reference to a user, either already pseudonymized or still a raw name.
///
/// On disk a JSON number is a resolved ID and a JSON string is a display
/// name that has not been through the resolver yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(u64),
    Name(String),
}

impl UserRef {
    /// The resolved ID, if this reference has one.
    pub fn id(&self) -> Option<u64> {
        match self {
            UserRef::Id(id) => Some(*id),
            UserRef::Name(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, UserRef::Id(_))
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "{id}"),
            UserRef::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

impl From<&str> for UserRef {
    fn from(name: &str) -> Self {
        UserRef::Name(name.to_string())
    }
}

// ── Name table ──────────────────────────────────────────────────────────────

/// Persisted mapping from numeric user ID to canonical display name.
///
/// Backed by a `BTreeMap` so iteration and serialization are always in
/// ascending ID order. Keys are written as JSON strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameTable {
    names: BTreeMap<u64, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.names.contains_key(&id)
    }

    /// Whether a user reference points at a known ID. Raw names never do.
    pub fn knows(&self, user: &UserRef) -> bool {
        user.id().is_some_and(|id| self.contains(id))
    }

    pub fn name_of(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Insert a new mapping. Existing IDs are never overwritten; returns
    /// `false` if `id` was already taken.
    pub fn insert(&mut self, id: u64, name: impl Into<String>) -> bool {
        match self.names.entry(id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(name.into());
                true
            }
        }
    }

    /// Iterate `(id, name)` pairs in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

impl FromIterator<(u64, String)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        let mut table = NameTable::new();
        for (id, name) in iter {
            table.insert(id, name);
        }
        table
    }
}

// ── Levels ──────────────────────────────────────────────────────────────────

/// One ranked level, loaded from `<filename>.json`.
///
/// Numeric fields are kept as exact JSON numbers so a rewrite does not
/// change their textual form. Fields not named here survive in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// In-game level ID. Not unique on its own: two-player variants share it.
    pub id: Number,
    pub name: String,
    pub author: UserRef,
    pub creators: Vec<UserRef>,
    pub verifier: UserRef,
    /// Link to the verification video.
    pub verification: String,
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Level {
    /// Every user reference in the level, in file order: author, verifier,
    /// creators, then record holders.
    pub fn user_refs(&self) -> impl Iterator<Item = &UserRef> {
        [&self.author, &self.verifier]
            .into_iter()
            .chain(self.creators.iter())
            .chain(self.records.iter().map(|r| &r.user))
    }

    /// Mutable counterpart of [`Level::user_refs`], same order.
    pub fn user_refs_mut(&mut self) -> impl Iterator<Item = &mut UserRef> {
        [&mut self.author, &mut self.verifier]
            .into_iter()
            .chain(self.creators.iter_mut())
            .chain(self.records.iter_mut().map(|r| &mut r.user))
    }
}

/// A user's completion (or progress) on a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub user: UserRef,
    /// Proof video link.
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<Number>,
    /// Refresh rate the run was played at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hz: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Editors ─────────────────────────────────────────────────────────────────

/// A list editor entry from `_editors.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Editor {
    pub role: String,
    pub name: UserRef,
    /// Profile link.
    pub link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Packs ───────────────────────────────────────────────────────────────────

/// A named, coloured grouping of levels from `_packlist.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub name: String,
    pub colour: String,
    /// Level filenames, as listed in `_list.json`.
    pub levels: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
