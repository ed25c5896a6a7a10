//! listkeeper CLI
//!
//! Command-line interface for pseudonymizing user names in the list dataset
//! and validating it before publishing.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use listkeeper_lib::DataDir;
use listkeeper_lib::settings;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_show};
use commands::lookup::run_lookup;
use commands::resolve::run_resolve;
use commands::validate::run_validate;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings::load_settings();
    let data = || DataDir::new(settings.resolve_data_dir(cli.data_dir.clone()));

    match cli.command {
        Commands::Resolve { names_only } => {
            run_resolve(&data(), settings.resolve_names_only(names_only))
        }
        Commands::Validate => run_validate(&data()),
        Commands::Check { names_only } => {
            let data = data();
            run_resolve(&data, settings.resolve_names_only(names_only))?;
            log::info!("");
            run_validate(&data)
        }
        Commands::Lookup { query } => run_lookup(&data(), &query),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show(&settings, cli.data_dir.clone());
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    }
}
