use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use listkeeper_lib::{DataDir, ResolveOptions, resolve_dataset};

use crate::error::CliError;

/// Replace raw user names with IDs across the dataset.
pub(crate) fn run_resolve(data: &DataDir, names_only: bool) -> Result<(), CliError> {
    log::info!(
        "{}",
        format!("Resolving user names in {}", data.root().display())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    if names_only {
        log::info!(
            "  {}",
            "names only: level and editor files will not be rewritten"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let report = resolve_dataset(data, &ResolveOptions { names_only })?;

    if !report.new_users.is_empty() {
        log::info!("");
        for (id, name) in &report.new_users {
            log::info!(
                "  {} {} -> {}",
                "new".if_supports_color(Stdout, |t| t.green()),
                name,
                id.if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }

    let stats = &report.stats;
    log::info!("");
    log::info!("{}", "Resolve complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Levels:         {:>6}", stats.levels_processed);
    log::info!("  Fields:         {:>6}", stats.fields_resolved);
    log::info!("  New users:      {:>6}", report.new_users.len());
    log::info!("  Files written:  {:>6}", stats.files_written);
    if !report.skipped.is_empty() {
        log::info!("  Skipped:        {:>6}", report.skipped.len());
    }
    if stats.name_table_written {
        log::info!("Written names to file");
    }

    Ok(())
}
