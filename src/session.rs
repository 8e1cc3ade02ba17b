//! Round protocol driver.
//!
//! A [`Session`] owns the game state, the phrase catalog, the current round
//! and the single countdown. Ticks and player commands are handled one at a
//! time from [`Session::run`], so nothing here is shared across threads.
//!
//! Round lifecycle: start (pick phrase, read budget, start countdown) →
//! resolve on submit or on the last tick → update [`GameState`] → start the
//! next round. The game never ends on a wrong answer; only [`Command::Quit`],
//! end of input, or cancellation stop it.

use std::ops::ControlFlow;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::game::{Countdown, GameState, Outcome, PhraseSource, Round, Tick, TickResult};
use crate::observability::{Event, EventEmitter, StopReason};

/// Player action delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Judge this answer now. `None` counts as an empty answer.
    Submit(Option<String>),
    /// Replace the staged answer without submitting it. A timeout judges
    /// whatever is staged at that moment.
    Stage(String),
    /// Cancel the countdown and go back to level 1.
    Restart,
    /// End the session.
    Quit,
}

/// Snapshot handed to the [`Presenter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View<'a> {
    /// Round sequence number.
    pub round: u64,
    /// Current level.
    pub level: u32,
    /// Current streak.
    pub streak: u32,
    /// Phrase to type.
    pub phrase: &'a str,
    /// Countdown length for this round.
    pub budget_secs: u32,
    /// Seconds left.
    pub remaining_secs: u32,
    /// `remaining / budget`, clamped to `[0, 1]`.
    pub progress: f64,
    /// How the previous round ended; cleared by a restart.
    pub feedback: Option<Outcome>,
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Why the session ended.
    pub reason: StopReason,
    /// Rounds judged, across restarts.
    pub rounds_played: u64,
    /// Rounds judged as a success, across restarts.
    pub rounds_won: u64,
    /// Highest level reached, across restarts.
    pub highest_level: u32,
    /// Level at the end.
    pub final_level: u32,
}

/// Rendering surface for a session.
///
/// Implementations decide layout and styling; the session only says what
/// changed.
pub trait Presenter {
    /// A new round started: show the phrase, level, and a full countdown.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the display cannot be written.
    fn round_started(&mut self, view: &View<'_>) -> std::io::Result<()>;

    /// One second elapsed in the current round.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the display cannot be written.
    fn countdown(&mut self, view: &View<'_>) -> std::io::Result<()>;

    /// The current round was judged.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the display cannot be written.
    fn resolved(&mut self, outcome: Outcome, view: &View<'_>) -> std::io::Result<()>;

    /// The session ended.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the display cannot be written.
    fn finished(&mut self, summary: &Summary) -> std::io::Result<()>;
}

/// One game session.
pub struct Session<P> {
    state: GameState,
    phrases: PhraseSource,
    round: Option<Round>,
    feedback: Option<Outcome>,
    rounds_started: u64,
    rounds_played: u64,
    rounds_won: u64,
    highest_level: u32,
    countdown: Countdown,
    ticks: mpsc::UnboundedReceiver<Tick>,
    presenter: P,
    events: EventEmitter,
}

impl<P: Presenter> Session<P> {
    /// Creates an idle session at level 1.
    #[must_use]
    pub fn new(phrases: PhraseSource, presenter: P, events: EventEmitter) -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();
        Self::with_countdown(phrases, presenter, events, Countdown::new(tx), ticks)
    }

    /// Creates an idle session around an existing countdown and its tick
    /// receiver.
    #[must_use]
    pub fn with_countdown(
        phrases: PhraseSource,
        presenter: P,
        events: EventEmitter,
        countdown: Countdown,
        ticks: mpsc::UnboundedReceiver<Tick>,
    ) -> Self {
        let state = GameState::new();
        Self {
            highest_level: state.level(),
            state,
            phrases,
            round: None,
            feedback: None,
            rounds_started: 0,
            rounds_played: 0,
            rounds_won: 0,
            countdown,
            ticks,
            presenter,
            events,
        }
    }

    /// Game progress.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The round in progress, or `None` before the first round.
    #[must_use]
    pub const fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// How the previous round ended.
    #[must_use]
    pub const fn feedback(&self) -> Option<Outcome> {
        self.feedback
    }

    /// The presenter, for front ends that need to inspect it.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The countdown owned by this session.
    #[must_use]
    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Plays until the player quits, `commands` closes, or `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the presenter fails.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        cancel: CancellationToken,
    ) -> std::io::Result<Summary> {
        self.events.emit(Event::SessionStarted {
            timestamp: Utc::now(),
            catalog_size: self.phrases.len(),
        });
        info!(catalog_size = self.phrases.len(), "session started");

        self.start_round()?;

        let reason = loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("session cancelled");
                    break StopReason::Cancelled;
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("command stream closed");
                        break StopReason::EndOfInput;
                    };
                    if self.handle_command(command)?.is_break() {
                        break StopReason::Quit;
                    }
                }
                Some(tick) = self.ticks.recv() => {
                    self.handle_tick(tick)?;
                }
            }
        };

        self.finish(reason)
    }

    /// Starts the next round: new phrase, current budget, fresh countdown.
    ///
    /// Any running countdown is stopped first.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the presenter fails.
    pub fn start_round(&mut self) -> std::io::Result<()> {
        self.countdown.stop();

        self.rounds_started = self.rounds_started.saturating_add(1);
        let number = self.rounds_started;
        let budget = self.state.time_budget_secs();
        let phrase = self.phrases.random_phrase().to_owned();

        debug!(round = number, level = self.state.level(), budget, "round started");
        self.events.emit(Event::RoundStarted {
            timestamp: Utc::now(),
            round: number,
            level: self.state.level(),
            phrase: phrase.clone(),
            time_budget_secs: budget,
        });

        self.round = Some(Round::start(number, phrase, budget));
        self.countdown.start(number);

        if let Some(view) = view_of(&self.state, self.round.as_ref(), self.feedback) {
            self.presenter.round_started(&view)?;
        }
        Ok(())
    }

    /// Applies one countdown tick.
    ///
    /// Ticks from an earlier round are ignored. The last tick resolves the
    /// round as a timeout and starts the next one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the presenter fails.
    pub fn handle_tick(&mut self, tick: Tick) -> std::io::Result<()> {
        let Some(round) = self.round.as_mut() else {
            trace!(generation = tick.generation, "tick with no round");
            return Ok(());
        };
        if round.number() != tick.generation {
            trace!(
                generation = tick.generation,
                current = round.number(),
                "stale tick ignored"
            );
            return Ok(());
        }

        match round.tick() {
            TickResult::Running(_) => {
                if let Some(view) = view_of(&self.state, self.round.as_ref(), self.feedback) {
                    self.presenter.countdown(&view)?;
                }
                Ok(())
            }
            TickResult::Expired => {
                self.countdown.stop();
                match round.expire() {
                    Some(outcome) => self.resolve(outcome),
                    None => Ok(()),
                }
            }
            TickResult::Ignored => Ok(()),
        }
    }

    /// Applies one player command.
    ///
    /// Returns [`ControlFlow::Break`] when the player quits.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the presenter fails.
    pub fn handle_command(&mut self, command: Command) -> std::io::Result<ControlFlow<()>> {
        match command {
            Command::Submit(input) => {
                let outcome = self
                    .round
                    .as_mut()
                    .and_then(|round| round.submit(input.as_deref()));
                if let Some(outcome) = outcome {
                    self.countdown.stop();
                    self.resolve(outcome)?;
                }
            }
            Command::Stage(input) => {
                if let Some(round) = self.round.as_mut() {
                    round.stage(input);
                }
            }
            Command::Restart => self.restart()?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Cancels the countdown, resets progress to level 1, clears feedback,
    /// and starts a new round.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the presenter fails.
    pub fn restart(&mut self) -> std::io::Result<()> {
        self.countdown.stop();
        let previous_level = self.state.level();
        self.state.reset();
        self.feedback = None;

        info!(previous_level, "session restarted");
        self.events.emit(Event::SessionRestarted {
            timestamp: Utc::now(),
            previous_level,
        });

        self.start_round()
    }

    fn resolve(&mut self, outcome: Outcome) -> std::io::Result<()> {
        let (round, elapsed_secs) = self
            .round
            .as_ref()
            .map_or((0, 0), |r| (r.number(), r.elapsed_secs()));

        if outcome.is_success() {
            self.rounds_won = self.rounds_won.saturating_add(1);
            if self.state.advance() {
                info!(
                    level = self.state.level(),
                    budget = self.state.time_budget_secs(),
                    "difficulty increased"
                );
                self.events.emit(Event::DifficultyIncreased {
                    timestamp: Utc::now(),
                    level: self.state.level(),
                    time_budget_secs: self.state.time_budget_secs(),
                });
            }
        } else {
            self.state.reset_streak();
        }
        self.rounds_played = self.rounds_played.saturating_add(1);
        self.highest_level = self.highest_level.max(self.state.level());
        self.feedback = Some(outcome);

        debug!(round, %outcome, level = self.state.level(), "round resolved");
        self.events.emit(Event::RoundResolved {
            timestamp: Utc::now(),
            round,
            outcome,
            elapsed_secs,
            level: self.state.level(),
            streak: self.state.consecutive_correct(),
        });

        if let Some(view) = view_of(&self.state, self.round.as_ref(), self.feedback) {
            self.presenter.resolved(outcome, &view)?;
        }

        self.start_round()
    }

    fn finish(mut self, reason: StopReason) -> std::io::Result<Summary> {
        self.countdown.stop();

        let summary = Summary {
            reason,
            rounds_played: self.rounds_played,
            rounds_won: self.rounds_won,
            highest_level: self.highest_level,
            final_level: self.state.level(),
        };

        info!(
            %reason,
            rounds_played = summary.rounds_played,
            highest_level = summary.highest_level,
            "session ended"
        );
        self.events.emit(Event::SessionEnded {
            timestamp: Utc::now(),
            reason,
            rounds_played: summary.rounds_played,
            highest_level: summary.highest_level,
        });

        self.presenter.finished(&summary)?;
        Ok(summary)
    }
}

fn view_of<'a>(
    state: &GameState,
    round: Option<&'a Round>,
    feedback: Option<Outcome>,
) -> Option<View<'a>> {
    round.map(|round| View {
        round: round.number(),
        level: state.level(),
        streak: state.consecutive_correct(),
        phrase: round.phrase(),
        budget_secs: round.budget_secs(),
        remaining_secs: round.remaining_secs(),
        progress: round.progress(),
        feedback,
    })
}

impl<P> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("round", &self.round)
            .field("feedback", &self.feedback)
            .field("rounds_played", &self.rounds_played)
            .finish_non_exhaustive()
    }
}
