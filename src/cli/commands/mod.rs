//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod phrases;
pub mod play;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::error::TypeRushError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` ends a running game early (e.g. on Ctrl+C).
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), TypeRushError> {
    match cli.command {
        Commands::Play(args) => play::run(&args, cli.color, cancel).await,
        Commands::Phrases(args) => phrases::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}
