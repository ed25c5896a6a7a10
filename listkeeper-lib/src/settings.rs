//! Shared settings (data directory, resolver mode, config file location).
//!
//! The settings file is `~/.config/listkeeper/settings.toml`:
//! ```toml
//! [data]
//! dir = "/path/to/site/data"
//!
//! [resolve]
//! names_only = false
//! ```
//! Command-line flags always win over the file.

use std::path::{Path, PathBuf};

/// Data directory used when neither the CLI nor the settings file name one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Values read from the settings file. Missing keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub names_only: Option<bool>,
}

/// Canonical path to the settings file: `~/.config/listkeeper/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("listkeeper").join("settings.toml")
}

/// Load settings from the canonical location.
///
/// A missing or unparsable file yields empty settings.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    let Some(doc) = std::fs::read_to_string(path)
        .ok()
        .and_then(|c| c.parse::<toml::Value>().ok())
    else {
        return Settings::default();
    };

    let data_dir = doc
        .get("data")
        .and_then(|d| d.get("dir"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    let names_only = doc
        .get("resolve")
        .and_then(|r| r.get("names_only"))
        .and_then(|v| v.as_bool());

    Settings {
        data_dir,
        names_only,
    }
}

impl Settings {
    /// Resolve the data directory using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `data.dir` in `settings.toml`
    /// 3. `./data` under the current working directory
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(p) = cli_override {
            return p;
        }
        if let Some(p) = &self.data_dir {
            return p.clone();
        }
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_DATA_DIR)
    }

    /// `--names-only` on the command line, else `resolve.names_only`.
    pub fn resolve_names_only(&self, cli_flag: bool) -> bool {
        cli_flag || self.names_only.unwrap_or(false)
    }
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
