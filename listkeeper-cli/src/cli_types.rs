//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "listkeeper")]
#[command(
    about = "Pseudonymize user names and validate the list dataset",
    long_about = None
)]
pub(crate) struct Cli {
    /// Data directory holding _list.json and the level files (defaults to ./data)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replace raw user names with stable IDs across the dataset
    Resolve {
        /// Only update _name_map.json; leave editor and level files untouched
        #[arg(long)]
        names_only: bool,
    },

    /// Check structural and referential integrity of the dataset
    Validate,

    /// Resolve names, then validate the result
    Check {
        /// Only update _name_map.json; leave editor and level files untouched
        #[arg(long)]
        names_only: bool,
    },

    /// Show the ID for a user name, or the name for an ID
    Lookup {
        /// A display name (case-insensitive) or a numeric user ID
        query: String,
    },

    /// Manage listkeeper settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and effective values
    Show,

    /// Print the settings file path
    Path,
}
