//! Logger setup: plain messages by default, timestamps in verbose mode.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Install the global logger. `RUST_LOG` still overrides the chosen level.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            let prefix = match record.level() {
                Level::Error => Some(format!(
                    "{} ",
                    "error:".if_supports_color(Stdout, |t| t.red())
                )),
                Level::Warn => Some(format!(
                    "{} ",
                    "warning:".if_supports_color(Stdout, |t| t.yellow())
                )),
                _ => None,
            };
            let prefix = prefix.unwrap_or_default();
            if verbose {
                writeln!(
                    buf,
                    "{} [{}] {}{}",
                    buf.timestamp_seconds(),
                    record.target(),
                    prefix,
                    record.args()
                )
            } else {
                writeln!(buf, "{}{}", prefix, record.args())
            }
        });
    builder.init();
}
