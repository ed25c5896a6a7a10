use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use listkeeper_lib::{DataDir, validate_dir};

use crate::error::CliError;

/// Check the dataset and report every violation found.
pub(crate) fn run_validate(data: &DataDir) -> Result<(), CliError> {
    log::info!(
        "{}",
        format!("Validating {}", data.root().display()).if_supports_color(Stdout, |t| t.bold()),
    );

    let report = validate_dir(data)?;

    for violation in &report.violations {
        log::error!("{}", violation);
    }

    log::info!("");
    log::info!("  Levels checked: {:>6}", report.levels_checked);
    log::info!("  Packs checked:  {:>6}", report.packs_checked);
    log::info!("  Editors:        {:>6}", report.editors_checked);

    if report.has_errors() {
        return Err(CliError::Violations(report.violations.len()));
    }

    log::info!("{}", "No problems found".if_supports_color(Stdout, |t| t.green()));
    Ok(())
}
