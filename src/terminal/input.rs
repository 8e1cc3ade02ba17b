//! Stdin command reader.
//!
//! Each line is an answer, except a few control lines:
//!
//! | Line | Command |
//! |------|---------|
//! | `:restart`, `:r` | [`Command::Restart`] |
//! | `:quit`, `:q` | [`Command::Quit`] |
//!
//! End of input closes the command channel, which ends the session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::session::Command;

/// Capacity of the command channel between the reader and the session.
pub const COMMAND_BUFFER: usize = 16;

/// Maps one input line to a command.
#[must_use]
pub fn parse_line(line: &str) -> Command {
    match line.trim() {
        ":restart" | ":r" => Command::Restart,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Submit(Some(line.trim_end_matches(['\r', '\n']).to_string())),
    }
}

/// Forwards every line of `reader` as a command until EOF or until the
/// receiver is dropped. Invalid UTF-8 is replaced, not rejected, so a
/// garbled line is just a wrong answer.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub async fn forward_commands<R>(mut reader: R, tx: mpsc::Sender<Command>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let command = parse_line(&String::from_utf8_lossy(&buf));
        let quit = command == Command::Quit;
        if tx.send(command).await.is_err() {
            debug!("session gone; stopping input reader");
            break;
        }
        if quit {
            break;
        }
    }
    Ok(())
}

/// Spawns a task reading commands from stdin.
pub fn spawn_stdin_reader(tx: mpsc::Sender<Command>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        if let Err(e) = forward_commands(stdin, tx).await {
            warn!(error = %e, "failed to read from stdin");
        }
    })
}
