//! Diagnostic logging to stderr.
//!
//! stdout belongs to the game display, so the subscriber always writes to
//! stderr. Human output is compact and drops timestamps below `debug`
//! level, where the game's own countdown is the only clock that matters.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an [`EnvFilter`] directive.
pub const LOG_LEVEL_ENV: &str = "TYPERUSH_LOG_LEVEL";

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Compact text, ANSI-colored when the terminal allows it.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Default filter directive for a `-v` count: warn, info, debug, then
/// trace for anything above two.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the level filter, preferring a valid [`LOG_LEVEL_ENV`] directive
/// over the `-v` count.
#[must_use]
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)))
}

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = build_filter(verbosity);
    let detailed = verbosity >= 2;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(detailed)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human if detailed => builder
            .compact()
            .with_ansi(color.enabled_for(&std::io::stderr()))
            .try_init(),
        LogFormat::Human => builder
            .compact()
            .without_time()
            .with_ansi(color.enabled_for(&std::io::stderr()))
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
