use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use listkeeper_lib::settings::{self, Settings};

/// Show the settings file and the values the other commands will use.
pub(crate) fn run_config_show(settings: &Settings, cli_data_dir: Option<PathBuf>) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "listkeeper Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let data_source = if cli_data_dir.is_some() {
        "--data-dir"
    } else if settings.data_dir.is_some() {
        "settings file"
    } else {
        "default"
    };
    let data_dir = settings.resolve_data_dir(cli_data_dir);
    log::info!(
        "  Data dir:      {} {}",
        data_dir.display(),
        format!("({data_source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Names only:    {}", settings.resolve_names_only(false));

    if let Some(contents) = settings::load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("    {}", line);
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}
