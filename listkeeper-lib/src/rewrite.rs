//! Dataset-wide name resolution.
//!
//! Replaces every raw user name in `_editors.json` and the level files with
//! its ID. Everything is read up front and nothing is written until every
//! reference has been resolved. The name table is persisted before any file
//! that points into it, so a failed write never leaves an ID without a name.

use listkeeper_catalog::{DataDir, Editor, JsonDoc, Level, UserRef};
use rand::Rng;

use crate::error::ResolveError;
use crate::resolver::IdentityResolver;

/// Options controlling a resolver run.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Only persist the name table; leave editor and level files untouched.
    pub names_only: bool,
}

/// Counters from a resolver run.
#[derive(Debug, Default)]
pub struct ResolveStats {
    pub levels_processed: usize,
    pub fields_resolved: usize,
    pub files_written: usize,
    pub name_table_written: bool,
}

/// A level file the run could not load and left alone.
#[derive(Debug)]
pub struct SkippedLevel {
    pub filename: String,
    pub reason: String,
}

/// Result of a resolver run.
#[derive(Debug, Default)]
pub struct ResolveReport {
    pub stats: ResolveStats,
    /// Newly minted users, in assignment order.
    pub new_users: Vec<(u64, String)>,
    pub skipped: Vec<SkippedLevel>,
}

/// Load the name table from `data`, resolve the whole dataset with a fresh
/// entropy-seeded resolver, and persist the results.
pub fn resolve_dataset(
    data: &DataDir,
    options: &ResolveOptions,
) -> Result<ResolveReport, ResolveError> {
    let table = data.load_name_table()?;
    let mut resolver = IdentityResolver::new(table);
    resolve_dataset_with(data, &mut resolver, options)
}

/// Resolve the whole dataset with a caller-supplied resolver.
///
/// The resolver should have been built from `data`'s own name table, since
/// the table it holds at the end is what gets written back.
pub fn resolve_dataset_with<R: Rng>(
    data: &DataDir,
    resolver: &mut IdentityResolver<R>,
    options: &ResolveOptions,
) -> Result<ResolveReport, ResolveError> {
    let mut report = ResolveReport::default();

    let level_list = data.load_level_list()?;
    let mut editors = data.load_editors_doc()?;

    let mut levels: Vec<(String, JsonDoc<Level>)> = Vec::with_capacity(level_list.len());
    for filename in level_list {
        match data.load_level_doc(&filename) {
            Ok(level) => levels.push((filename, level)),
            Err(e) => {
                log::warn!("Skipping level {}: {}", filename, e);
                report.skipped.push(SkippedLevel {
                    filename,
                    reason: e.to_string(),
                });
            }
        }
    }

    let editors_changed = resolve_editors(&mut editors.data, resolver, &mut report.stats)?;

    let mut changed_levels = Vec::new();
    for (idx, (filename, level)) in levels.iter_mut().enumerate() {
        if resolve_level(filename, &mut level.data, resolver, &mut report.stats)? {
            changed_levels.push(idx);
        }
        report.stats.levels_processed += 1;
    }

    report.stats.name_table_written = data.save_name_table(resolver.table())?;

    if options.names_only {
        log::debug!("Names-only run: leaving editor and level files untouched");
    } else {
        if editors_changed && data.save_editors(&editors)? {
            report.stats.files_written += 1;
        }
        for idx in changed_levels {
            let (filename, level) = &levels[idx];
            if data.save_level(filename, level)? {
                log::debug!("Wrote {}", filename);
                report.stats.files_written += 1;
            }
        }
    }

    report.new_users = resolver
        .minted()
        .iter()
        .filter_map(|&id| {
            resolver
                .table()
                .name_of(id)
                .map(|name| (id, name.to_string()))
        })
        .collect();

    Ok(report)
}

fn resolve_editors<R: Rng>(
    editors: &mut [Editor],
    resolver: &mut IdentityResolver<R>,
    stats: &mut ResolveStats,
) -> Result<bool, ResolveError> {
    let mut changed = false;
    for editor in editors.iter_mut() {
        let context = format!("editor ({})", editor.role);
        changed |= resolve_one(&context, &mut editor.name, resolver, stats)?;
    }
    Ok(changed)
}

fn resolve_level<R: Rng>(
    filename: &str,
    level: &mut Level,
    resolver: &mut IdentityResolver<R>,
    stats: &mut ResolveStats,
) -> Result<bool, ResolveError> {
    let mut changed = false;
    for user in level.user_refs_mut() {
        changed |= resolve_one(filename, user, resolver, stats)?;
    }
    Ok(changed)
}

/// Resolve a single reference. Blank names are left in place for the
/// validator to report rather than aborting the run.
fn resolve_one<R: Rng>(
    context: &str,
    user: &mut UserRef,
    resolver: &mut IdentityResolver<R>,
    stats: &mut ResolveStats,
) -> Result<bool, ResolveError> {
    match resolver.resolve_ref(user) {
        Ok(true) => {
            stats.fields_resolved += 1;
            Ok(true)
        }
        Ok(false) => Ok(false),
        Err(ResolveError::EmptyName) => {
            log::warn!("{}: blank user name left unresolved", context);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "tests/rewrite_tests.rs"]
mod tests;
