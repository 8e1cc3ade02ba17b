//! `version` command handler
//!
//! Prints the package name and version, plus the difficulty constants
//! this build was compiled with.

use std::io::Write;

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::TypeRushError;
use crate::game::state::{
    INITIAL_TIME_BUDGET_SECS, MIN_TIME_BUDGET_SECS, STREAK_INTERVAL, TIME_BUDGET_STEP_SECS,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information to stdout.
///
/// # Errors
///
/// Returns an I/O error if stdout is closed.
pub fn run(args: &VersionArgs) -> Result<(), TypeRushError> {
    let mut out = std::io::stdout().lock();
    write_version(&mut out, args.format)
}

fn write_version(out: &mut impl Write, format: OutputFormat) -> Result<(), TypeRushError> {
    match format {
        OutputFormat::Human => {
            writeln!(out, "{NAME} {VERSION}")?;
            writeln!(
                out,
                "countdown {INITIAL_TIME_BUDGET_SECS}s, -{TIME_BUDGET_STEP_SECS}s every \
                 {STREAK_INTERVAL} in a row, floor {MIN_TIME_BUDGET_SECS}s"
            )?;
        }
        OutputFormat::Json => {
            let info = json!({
                "name": NAME,
                "version": VERSION,
                "difficulty": {
                    "initial_time_budget_secs": INITIAL_TIME_BUDGET_SECS,
                    "time_budget_step_secs": TIME_BUDGET_STEP_SECS,
                    "min_time_budget_secs": MIN_TIME_BUDGET_SECS,
                    "streak_interval": STREAK_INTERVAL,
                },
            });
            serde_json::to_writer(&mut *out, &info)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
