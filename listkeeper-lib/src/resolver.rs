//! Stable pseudonymous IDs for user display names.
//!
//! The resolver owns the [`NameTable`] together with a lowercase lookup index
//! and hands out one ID per distinct (case-insensitive, trimmed) name. Unseen
//! names get a fresh random ID drawn from an [`IdRange`].

use std::collections::HashMap;
use std::fmt;

use listkeeper_catalog::{NameTable, UserRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ResolveError;

/// Number of decimal digits in a user ID.
pub const ID_DIGITS: u32 = 10;

/// Consecutive collisions tolerated before minting gives up.
const MAX_MINT_ATTEMPTS: usize = 10_000;

/// Closed, non-empty range IDs are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    min: u64,
    max: u64,
}

impl IdRange {
    /// Every `digits`-digit number with a nonzero leading digit, or `None`
    /// unless `digits` is in `1..=19` (the widths that fit a `u64`).
    pub const fn digits(digits: u32) -> Option<Self> {
        if digits == 0 || digits > 19 {
            return None;
        }
        let min = 10u64.pow(digits - 1);
        Some(Self {
            min,
            max: min * 10 - 1,
        })
    }

    /// `[min, max]`, or `None` if `min > max`.
    pub const fn new(min: u64, max: u64) -> Option<Self> {
        if min > max {
            return None;
        }
        Some(Self { min, max })
    }

    pub const fn min(&self) -> u64 {
        self.min
    }

    pub const fn max(&self) -> u64 {
        self.max
    }

    pub fn contains(&self, id: u64) -> bool {
        (self.min..=self.max).contains(&id)
    }
}

impl Default for IdRange {
    fn default() -> Self {
        let min = 10u64.pow(ID_DIGITS - 1);
        Self {
            min,
            max: min * 10 - 1,
        }
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Lookup key for a display name: trimmed and lowercased.
fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Owns the name table and its case-insensitive index.
///
/// The random source is injectable so tests can mint deterministically.
pub struct IdentityResolver<R = StdRng> {
    table: NameTable,
    lookup: HashMap<String, u64>,
    range: IdRange,
    rng: R,
    minted: Vec<u64>,
}

impl IdentityResolver<StdRng> {
    /// Create a resolver seeded from OS entropy.
    pub fn new(table: NameTable) -> Self {
        Self::with_rng(table, StdRng::from_entropy())
    }
}

impl<R: Rng> IdentityResolver<R> {
    pub fn with_rng(table: NameTable, rng: R) -> Self {
        let mut lookup = HashMap::with_capacity(table.len());
        for (id, name) in table.iter() {
            let key = lookup_key(name);
            match lookup.get(&key) {
                // Table order is ascending, so the lowest ID keeps the key
                Some(&existing) => log::warn!(
                    "Name table has case-colliding entries for '{}': {} and {}; using {}",
                    name,
                    existing,
                    id,
                    existing
                ),
                None => {
                    lookup.insert(key, id);
                }
            }
        }

        Self {
            table,
            lookup,
            range: IdRange::default(),
            rng,
            minted: Vec::new(),
        }
    }

    /// Draw new IDs from `range` instead of the default 10-digit range.
    pub fn with_range(mut self, range: IdRange) -> Self {
        self.range = range;
        self
    }

    /// Return the ID for `name`, minting and recording a new one if the name
    /// has not been seen in any casing.
    pub fn resolve(&mut self, name: &str) -> Result<u64, ResolveError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyName);
        }

        let key = lookup_key(trimmed);
        if let Some(&id) = self.lookup.get(&key) {
            return Ok(id);
        }

        let id = self.mint()?;
        self.table.insert(id, trimmed);
        self.lookup.insert(key, id);
        self.minted.push(id);
        log::debug!("Assigned {} to new user '{}'", id, trimmed);
        Ok(id)
    }

    /// Resolve a reference in place. Already-resolved IDs are left alone.
    ///
    /// Returns `true` if the reference was rewritten.
    pub fn resolve_ref(&mut self, user: &mut UserRef) -> Result<bool, ResolveError> {
        let UserRef::Name(name) = user else {
            return Ok(false);
        };
        let id = self.resolve(name)?;
        *user = UserRef::Id(id);
        Ok(true)
    }

    /// Look up a name without minting.
    pub fn lookup(&self, name: &str) -> Option<u64> {
        self.lookup.get(&lookup_key(name)).copied()
    }

    pub fn table(&self) -> &NameTable {
        &self.table
    }

    pub fn into_table(self) -> NameTable {
        self.table
    }

    /// IDs minted by this resolver, in the order they were assigned.
    pub fn minted(&self) -> &[u64] {
        &self.minted
    }

    fn mint(&mut self) -> Result<u64, ResolveError> {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate = self.rng.gen_range(self.range.min..=self.range.max);
            if !self.table.contains(candidate) {
                return Ok(candidate);
            }
            log::debug!("ID collision on {}, drawing again", candidate);
        }
        Err(ResolveError::IdSpaceExhausted {
            range: self.range,
            attempts: MAX_MINT_ATTEMPTS,
        })
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
