//! Structural and referential integrity checks for the whole dataset.
//!
//! Loading the master files (`_list.json`, `_packlist.json`,
//! `_name_map.json`, `_editors.json`) is fatal on failure. Everything after
//! that is collected into a [`ValidationReport`] so one run lists every
//! problem at once.

use std::collections::{HashMap, HashSet};
use std::fmt;

use listkeeper_catalog::{
    DataDir, DataError, EDITORS_FILE, Editor, Level, NameTable, Pack, UserRef,
};
use url::{Host, Url};

use crate::error::ValidateError;

/// Filename suffix marking a two-player variant of a level. Such a file may
/// share its in-game ID with the one-player version.
pub const TWO_PLAYER_SUFFIX: &str = "2p";

/// Longest URL accepted as a record or verification link.
pub const MAX_URL_LEN: usize = 2048;

/// How a level file listed in `_list.json` turned out on load.
#[derive(Debug, Clone)]
pub enum LevelSource {
    Loaded(Level),
    Missing,
    /// The file exists but is not valid JSON of the expected shape.
    Invalid(String),
}

/// Everything the validator looks at, loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub level_list: Vec<String>,
    pub packs: Vec<Pack>,
    pub names: NameTable,
    pub editors: Vec<Editor>,
    /// One entry per `level_list` item, same order.
    pub levels: Vec<(String, LevelSource)>,
}

impl Dataset {
    /// Load the dataset from disk.
    ///
    /// Fails only on master files. Level files that are missing or invalid
    /// are recorded as such and reported by [`validate`].
    pub fn load(data: &DataDir) -> Result<Self, ValidateError> {
        let level_list = data.load_level_list()?;
        let packs = data.load_pack_list()?;
        let names = data.load_name_table()?;
        let editors = data.load_editors()?;

        if let Some(editor) = editors.iter().find(|e| !e.name.is_resolved()) {
            return Err(ValidateError::shape(
                EDITORS_FILE,
                format!("editor name '{}' ({}) is not an ID", editor.name, editor.role),
            ));
        }

        let levels = level_list
            .iter()
            .map(|filename| {
                let source = match data.load_level(filename) {
                    Ok(level) => LevelSource::Loaded(level),
                    Err(DataError::NotFound(_)) => LevelSource::Missing,
                    Err(e) => LevelSource::Invalid(e.to_string()),
                };
                (filename.clone(), source)
            })
            .collect();

        Ok(Self {
            level_list,
            packs,
            names,
            editors,
            levels,
        })
    }
}

/// A single integrity problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    InvalidLevel { file: String, reason: String },
    MissingFile { file: String },
    DuplicateLevelId { file: String, previous: String },
    UnknownVerifier { file: String, verifier: UserRef },
    InvalidVerificationUrl { file: String, url: String },
    DuplicateRecord { file: String, user: UserRef },
    UnknownRecordUser { file: String, user: UserRef },
    InvalidRecordUrl { file: String, user: UserRef, url: String },
    DuplicateCreator { file: String, creator: UserRef },
    UnknownCreator { file: String, creator: UserRef },
    DuplicatePackName { pack: String },
    UnknownPackLevel { pack: String, level: String },
    UnknownEditor { name: UserRef, role: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::InvalidLevel { file, reason } => write!(f, "Invalid level {file}: {reason}"),
            Violation::MissingFile { file } => write!(f, "Missing file {file}"),
            Violation::DuplicateLevelId { file, previous } => write!(
                f,
                "Duplicate gd level id in file {file} with previous file {previous}"
            ),
            Violation::UnknownVerifier { file, verifier } => {
                write!(f, "Invalid verifier: {file}: {verifier}")
            }
            Violation::InvalidVerificationUrl { file, url } => {
                write!(f, "Invalid verification Url: {file}: {url}")
            }
            Violation::DuplicateRecord { file, user } => {
                write!(f, "Duplicate Record: {file}: {user}")
            }
            Violation::UnknownRecordUser { file, user } => {
                write!(f, "Invalid username: {file}: {user}")
            }
            Violation::InvalidRecordUrl { file, user, url } => {
                write!(f, "Invalid Url: {file} {user}: {url}")
            }
            Violation::DuplicateCreator { file, creator } => {
                write!(f, "Duplicate Creator: {file}: {creator}")
            }
            Violation::UnknownCreator { file, creator } => {
                write!(f, "Invalid creator: {file}: {creator}")
            }
            Violation::DuplicatePackName { pack } => write!(f, "Duplicate pack name: \"{pack}\""),
            Violation::UnknownPackLevel { pack, level } => {
                write!(f, "Unknown level {level} in Pack \"{pack}\"")
            }
            Violation::UnknownEditor { name, role } => write!(f, "Unknown editor: {name} ({role})"),
        }
    }
}

/// Outcome of a validator run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Violations in the order they were found.
    pub violations: Vec<Violation>,
    pub levels_checked: usize,
    pub packs_checked: usize,
    pub editors_checked: usize,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Run every check against an in-memory dataset.
pub fn validate(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut level_keys: HashMap<String, &str> = HashMap::new();

    for (filename, source) in &dataset.levels {
        let level = match source {
            LevelSource::Loaded(level) => level,
            LevelSource::Missing => {
                report.violations.push(Violation::MissingFile {
                    file: filename.clone(),
                });
                continue;
            }
            LevelSource::Invalid(reason) => {
                report.violations.push(Violation::InvalidLevel {
                    file: filename.clone(),
                    reason: reason.clone(),
                });
                continue;
            }
        };

        if let Some(raw) = level.user_refs().find(|u| !u.is_resolved()) {
            report.violations.push(Violation::InvalidLevel {
                file: filename.clone(),
                reason: format!("'{raw}' is not a user ID"),
            });
            continue;
        }

        report.levels_checked += 1;

        let key = level_key(filename, level);
        if let Some(previous) = level_keys.insert(key, filename.as_str()) {
            report.violations.push(Violation::DuplicateLevelId {
                file: filename.clone(),
                previous: previous.to_string(),
            });
        }

        check_level(filename, level, &dataset.names, &mut report.violations);
    }

    check_packs(dataset, &mut report);

    for editor in &dataset.editors {
        report.editors_checked += 1;
        if !dataset.names.knows(&editor.name) {
            report.violations.push(Violation::UnknownEditor {
                name: editor.name.clone(),
                role: editor.role.clone(),
            });
        }
    }

    report
}

/// Load and validate a data directory in one go.
pub fn validate_dir(data: &DataDir) -> Result<ValidationReport, ValidateError> {
    let dataset = Dataset::load(data)?;
    Ok(validate(&dataset))
}

/// Key used for duplicate detection: the in-game ID, plus the two-player
/// suffix when the filename carries it.
fn level_key(filename: &str, level: &Level) -> String {
    let mut key = level.id.to_string();
    if filename.ends_with(TWO_PLAYER_SUFFIX) {
        key.push_str(TWO_PLAYER_SUFFIX);
    }
    key
}

fn check_level(file: &str, level: &Level, names: &NameTable, out: &mut Vec<Violation>) {
    if !names.knows(&level.verifier) {
        out.push(Violation::UnknownVerifier {
            file: file.to_string(),
            verifier: level.verifier.clone(),
        });
    }

    if !is_valid_url(&level.verification) {
        out.push(Violation::InvalidVerificationUrl {
            file: file.to_string(),
            url: level.verification.clone(),
        });
    }

    // The verifier counts as the first record holder
    let mut seen: HashSet<&UserRef> = HashSet::from([&level.verifier]);
    for record in &level.records {
        if !seen.insert(&record.user) {
            out.push(Violation::DuplicateRecord {
                file: file.to_string(),
                user: record.user.clone(),
            });
        }
        if !names.knows(&record.user) {
            out.push(Violation::UnknownRecordUser {
                file: file.to_string(),
                user: record.user.clone(),
            });
        }
        if !is_valid_url(&record.link) {
            out.push(Violation::InvalidRecordUrl {
                file: file.to_string(),
                user: record.user.clone(),
                url: record.link.clone(),
            });
        }
    }

    let mut creators: HashSet<&UserRef> = HashSet::new();
    for creator in &level.creators {
        if !creators.insert(creator) {
            out.push(Violation::DuplicateCreator {
                file: file.to_string(),
                creator: creator.clone(),
            });
        }
        if !names.knows(creator) {
            out.push(Violation::UnknownCreator {
                file: file.to_string(),
                creator: creator.clone(),
            });
        }
    }
}

fn check_packs(dataset: &Dataset, report: &mut ValidationReport) {
    let known_levels: HashSet<&str> = dataset.level_list.iter().map(String::as_str).collect();
    let mut pack_names: HashSet<&str> = HashSet::new();

    for pack in &dataset.packs {
        report.packs_checked += 1;
        if !pack_names.insert(pack.name.as_str()) {
            report.violations.push(Violation::DuplicatePackName {
                pack: pack.name.clone(),
            });
            continue;
        }
        for level in &pack.levels {
            if !known_levels.contains(level.as_str()) {
                report.violations.push(Violation::UnknownPackLevel {
                    pack: pack.name.clone(),
                    level: level.clone(),
                });
            }
        }
    }
}

/// Whether `candidate` is an absolute web URL: http(s) or ftp(s) scheme, a
/// real host (domain with a top-level label, `localhost`, or an IP), no
/// whitespace anywhere, and at most [`MAX_URL_LEN`] bytes.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty()
        || candidate.len() > MAX_URL_LEN
        || candidate.chars().any(char::is_whitespace)
    {
        return false;
    }
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https" | "ftp" | "ftps") {
        return false;
    }
    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain == "localhost" {
        return true;
    }
    let mut labels = domain.split('.');
    let Some(tld) = labels.next_back() else {
        return false;
    };
    let has_parent = labels.clone().next().is_some();
    has_parent
        && labels.all(is_valid_label)
        && tld.len() >= 2
        && (tld.starts_with("xn--") || tld.chars().all(|c| c.is_alphabetic()))
}

/// Letters, digits and inner hyphens, 1 to 63 bytes.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
