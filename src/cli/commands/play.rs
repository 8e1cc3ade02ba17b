//! `play` command handler
//!
//! Wires the terminal front end to a [`Session`] and runs it to completion.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{ColorChoice, PlayArgs};
use crate::error::TypeRushError;
use crate::game::PhraseSource;
use crate::observability::EventEmitter;
use crate::session::Session;
use crate::terminal::input::{COMMAND_BUFFER, spawn_stdin_reader};
use crate::terminal::TerminalPresenter;

/// Play until the player quits, stdin closes, or `cancel` fires.
///
/// # Errors
///
/// Returns a catalog error if the phrase catalog is missing, malformed or
/// empty, and an I/O error if the events file or the terminal fails.
pub async fn run(
    args: &PlayArgs,
    color: ColorChoice,
    cancel: CancellationToken,
) -> Result<(), TypeRushError> {
    let phrases = PhraseSource::load(args.catalog.as_deref(), args.seed)?;
    tracing::info!(phrases = phrases.len(), seeded = args.seed.is_some(), "catalog ready");

    let events = if let Some(ref path) = args.events_file {
        tracing::info!(events_file = %path.display(), "writing session events");
        EventEmitter::from_file(path)?
    } else {
        EventEmitter::noop()
    };

    let presenter = TerminalPresenter::stdout(
        args.wrap_width,
        color.enabled_for(&std::io::stdout()),
    );

    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let reader = spawn_stdin_reader(tx);

    let session = Session::new(phrases, presenter, events);
    let result = session.run(rx, cancel).await;

    // A blocked stdin read would otherwise keep the runtime alive.
    reader.abort();

    let summary = result?;
    tracing::debug!(?summary, "play finished");
    Ok(())
}
