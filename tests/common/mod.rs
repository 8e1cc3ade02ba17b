//! Shared integration-test harness for spawning `typerush` as a child
//! process and driving it over stdin/stdout.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

/// Default timeout for waiting on a line of game output.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Path of the compiled binary under test.
pub const BIN: &str = env!("CARGO_BIN_EXE_typerush");

/// Runs `typerush` to completion with `args` and empty stdin.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn spawn_command(args: &[&str]) -> std::process::Output {
    std::process::Command::new(BIN)
        .args(args)
        .env_remove("TYPERUSH_CATALOG")
        .env_remove("TYPERUSH_SEED")
        .env_remove("TYPERUSH_EVENTS_FILE")
        .stdin(std::process::Stdio::null())
        .output()
        .expect("failed to run typerush")
}

/// A running `typerush play` process.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
#[allow(clippy::missing_panics_doc)]
pub struct TypeRushProcess {
    child: Child,
    stdin: Option<tokio::process::ChildStdin>,
    reader: BufReader<tokio::process::ChildStdout>,
    transcript: Vec<String>,
}

impl TypeRushProcess {
    /// Starts `typerush play` with the given extra arguments.
    #[allow(clippy::missing_panics_doc)]
    pub fn play(extra_args: &[&str]) -> Self {
        let mut child = Command::new(BIN)
            .arg("--quiet")
            .arg("play")
            .args(extra_args)
            .env_remove("TYPERUSH_CATALOG")
            .env_remove("TYPERUSH_SEED")
            .env_remove("TYPERUSH_EVENTS_FILE")
            .env("TYPERUSH_COLOR", "never")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn typerush");

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        Self {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
            transcript: Vec::new(),
        }
    }

    /// Starts a game over a catalog file holding the given phrases.
    #[allow(clippy::missing_panics_doc)]
    pub fn play_with_catalog(catalog: &Path, extra_args: &[&str]) -> Self {
        let mut args = vec!["--catalog", catalog.to_str().expect("non-UTF-8 catalog path")];
        args.extend_from_slice(extra_args);
        Self::play(&args)
    }

    /// Writes one line to the game's stdin.
    #[allow(clippy::missing_panics_doc)]
    pub async fn send_line(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("failed to write to stdin");
        stdin.flush().await.expect("failed to flush stdin");
    }

    /// Reads output lines until one contains `needle`, returning it.
    ///
    /// Panics on EOF or if nothing matches within `timeout`.
    #[allow(clippy::missing_panics_doc)]
    pub async fn expect_line(&mut self, needle: &str, timeout: Duration) -> String {
        let result = tokio::time::timeout(timeout, async {
            loop {
                let mut line = String::new();
                let n = self
                    .reader
                    .read_line(&mut line)
                    .await
                    .expect("read_line I/O error");
                assert!(
                    n > 0,
                    "unexpected EOF waiting for {needle:?}\ntranscript:\n{}",
                    self.transcript.join("")
                );
                self.transcript.push(line.clone());
                if line.contains(needle) {
                    return line;
                }
            }
        })
        .await;
        result.unwrap_or_else(|_| {
            panic!(
                "timed out waiting for {needle:?}\ntranscript:\n{}",
                self.transcript.join("")
            )
        })
    }

    /// Everything read from stdout so far.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.transcript.join("")
    }

    /// Closes stdin, which ends the session.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Waits for the process to exit and returns its exit code.
    #[allow(clippy::missing_panics_doc)]
    pub async fn wait(mut self) -> Option<i32> {
        let status = tokio::time::timeout(DEFAULT_TIMEOUT, self.child.wait())
            .await
            .expect("timed out waiting for typerush to exit")
            .expect("failed to wait on typerush");
        status.code()
    }
}
