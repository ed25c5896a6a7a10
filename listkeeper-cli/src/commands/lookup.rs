use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use listkeeper_lib::{DataDir, IdentityResolver};

use crate::error::CliError;

/// Print the ID for a name, or the name for an ID. Never mints.
pub(crate) fn run_lookup(data: &DataDir, query: &str) -> Result<(), CliError> {
    let table = data.load_name_table()?;

    if let Ok(id) = query.trim().parse::<u64>() {
        if let Some(name) = table.name_of(id) {
            log::info!("{} -> {}", id, name.if_supports_color(Stdout, |t| t.bold()));
            return Ok(());
        }
    }

    let resolver = IdentityResolver::new(table);
    match resolver.lookup(query) {
        Some(id) => {
            let canonical = resolver.table().name_of(id).unwrap_or(query);
            log::info!(
                "{} -> {}",
                canonical.if_supports_color(Stdout, |t| t.bold()),
                id.if_supports_color(Stdout, |t| t.cyan()),
            );
            Ok(())
        }
        None => Err(CliError::not_found(format!("no user matches '{query}'"))),
    }
}
