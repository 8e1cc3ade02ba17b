//! Machine-readable record of a play session.
//!
//! With `--events-file`, every round start, judgement, difficulty step and
//! restart is appended as one JSON line. Lines carry a `sequence` number
//! starting at 0, so a reader can spot gaps left by failed writes.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::game::Outcome;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The player asked to quit.
    Quit,
    /// The input stream closed.
    EndOfInput,
    /// A shutdown signal arrived.
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Quit => "quit",
            Self::EndOfInput => "end of input",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A discrete event emitted during a `TypeRush` session.
///
/// Serialized with the variant name in a `"type"` field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The session is ready and the first round is about to start.
    SessionStarted {
        /// When the session started.
        timestamp: DateTime<Utc>,
        /// Number of phrases in the catalog.
        catalog_size: usize,
    },

    /// A phrase was shown and its countdown started.
    RoundStarted {
        /// When the round started.
        timestamp: DateTime<Utc>,
        /// Round sequence number within the session.
        round: u64,
        /// Level at the start of the round.
        level: u32,
        /// Phrase the player has to type.
        phrase: String,
        /// Countdown length in seconds.
        time_budget_secs: u32,
    },

    /// A round was judged.
    RoundResolved {
        /// When the round was judged.
        timestamp: DateTime<Utc>,
        /// Round sequence number within the session.
        round: u64,
        /// How the round ended.
        outcome: Outcome,
        /// Seconds spent before the answer.
        elapsed_secs: u32,
        /// Level after the transition.
        level: u32,
        /// Streak after the transition.
        streak: u32,
    },

    /// The per-round time budget shrank.
    DifficultyIncreased {
        /// When the budget changed.
        timestamp: DateTime<Utc>,
        /// Level that triggered the step.
        level: u32,
        /// New budget in seconds.
        time_budget_secs: u32,
    },

    /// The player restarted from level 1.
    SessionRestarted {
        /// When the restart happened.
        timestamp: DateTime<Utc>,
        /// Level reached before the restart.
        previous_level: u32,
    },

    /// The session ended.
    SessionEnded {
        /// When the session ended.
        timestamp: DateTime<Utc>,
        /// Why it ended.
        reason: StopReason,
        /// Rounds judged over the whole session.
        rounds_played: u64,
        /// Highest level reached, across restarts.
        highest_level: u32,
    },
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// An [`Event`] plus its position in the stream.
#[derive(Debug, Serialize)]
struct EventEnvelope {
    /// Position in the stream, from 0.
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// JSONL writer shared by the session.
///
/// Write errors are swallowed: a full disk must not end a game. The
/// sequence number still advances, which leaves a visible gap.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

// Box<dyn Write> is not Debug.
impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Emitter over any writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Emitter that discards everything.
    ///
    /// The default when no events file is requested; stdout belongs to the
    /// game display.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Emitter truncating and writing `path`.
    ///
    /// # Errors
    ///
    /// Returns the error from creating the file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Appends `event` as one line and flushes.
    ///
    /// Failures are silently dropped.
    pub fn emit(&self, event: Event) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let Ok(line) = serde_json::to_string(&EventEnvelope { sequence, event }) else {
            return;
        };
        if let Ok(mut w) = self.writer.lock() {
            let _ = writeln!(w, "{line}").and_then(|()| w.flush());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
