//! One display/countdown/submit cycle.
//!
//! A [`Round`] holds the ephemeral part of play: the phrase on screen, the
//! seconds left, and whatever the player has typed so far. It knows nothing
//! about timers; the session feeds it one [`Round::tick`] per second.

use serde::Serialize;

/// Where a round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round has started yet.
    Idle,
    /// Phrase shown, countdown running.
    AwaitingInput,
    /// Answer judged; waiting for the next round to start.
    Resolved,
}

/// How a round was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Submitted in time and matched.
    Correct,
    /// Countdown ran out, but the staged input already matched.
    CorrectAtTimeout,
    /// Submitted in time and did not match.
    Incorrect,
    /// Countdown ran out without a matching input.
    TimedOut,
}

impl Outcome {
    /// Whether this outcome advances the level.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Correct | Self::CorrectAtTimeout)
    }

    /// Feedback line shown to the player.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Correct => "Correct! Level cleared.",
            Self::CorrectAtTimeout => "Correct at the last second! Level cleared.",
            Self::Incorrect => "Incorrect. You stay on the same level, try again.",
            Self::TimedOut => "Time's up. You stay on the same level.",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Correct => "correct",
            Self::CorrectAtTimeout => "correct_at_timeout",
            Self::Incorrect => "incorrect",
            Self::TimedOut => "timed_out",
        };
        f.write_str(s)
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Time remains; carries the seconds left.
    Running(u32),
    /// The countdown just hit zero; the round must be resolved as a timeout.
    Expired,
    /// The round was already resolved; the tick is ignored.
    Ignored,
}

/// Compares an answer against the target phrase.
///
/// Leading and trailing whitespace of the answer is ignored; everything
/// else, case included, must match exactly. A missing or blank answer
/// never matches, whatever the phrase.
#[must_use]
pub fn is_match(input: Option<&str>, phrase: &str) -> bool {
    let answer = input.unwrap_or_default().trim();
    !answer.is_empty() && answer == phrase
}

/// Fraction of the budget still left, clamped to `[0, 1]`.
///
/// A zero budget yields `0.0`.
#[must_use]
pub fn progress(remaining: u32, budget: u32) -> f64 {
    if budget == 0 {
        return 0.0;
    }
    (f64::from(remaining) / f64::from(budget)).clamp(0.0, 1.0)
}

/// State of the round in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    number: u64,
    phrase: String,
    budget_secs: u32,
    remaining_secs: u32,
    staged: Option<String>,
    phase: RoundPhase,
    outcome: Option<Outcome>,
}

impl Round {
    /// Starts a round in [`RoundPhase::AwaitingInput`] with a full countdown.
    #[must_use]
    pub fn start(number: u64, phrase: impl Into<String>, budget_secs: u32) -> Self {
        Self {
            number,
            phrase: phrase.into(),
            budget_secs,
            remaining_secs: budget_secs,
            staged: None,
            phase: RoundPhase::AwaitingInput,
            outcome: None,
        }
    }

    /// Sequence number of this round within the session.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// The phrase to type.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Seconds the round started with.
    #[must_use]
    pub const fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Seconds spent so far.
    #[must_use]
    pub const fn elapsed_secs(&self) -> u32 {
        self.budget_secs.saturating_sub(self.remaining_secs)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// How the round ended, once resolved.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Input typed so far but not yet submitted.
    #[must_use]
    pub fn staged(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// See [`progress`].
    #[must_use]
    pub fn progress(&self) -> f64 {
        progress(self.remaining_secs, self.budget_secs)
    }

    /// Replaces the staged input. Ignored once the round is resolved.
    pub fn stage(&mut self, input: impl Into<String>) {
        if self.phase == RoundPhase::AwaitingInput {
            self.staged = Some(input.into());
        }
    }

    /// Counts down one second.
    pub const fn tick(&mut self) -> TickResult {
        if !matches!(self.phase, RoundPhase::AwaitingInput) {
            return TickResult::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            TickResult::Expired
        } else {
            TickResult::Running(self.remaining_secs)
        }
    }

    /// Judges an explicit submission.
    ///
    /// Returns `None` if the round was already resolved.
    pub fn submit(&mut self, input: Option<&str>) -> Option<Outcome> {
        if self.phase != RoundPhase::AwaitingInput {
            return None;
        }
        let outcome = if is_match(input, &self.phrase) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        Some(self.finish(outcome))
    }

    /// Judges the staged input after the countdown ran out.
    ///
    /// Returns `None` if the round was already resolved.
    pub fn expire(&mut self) -> Option<Outcome> {
        if self.phase != RoundPhase::AwaitingInput {
            return None;
        }
        let outcome = if is_match(self.staged.as_deref(), &self.phrase) {
            Outcome::CorrectAtTimeout
        } else {
            Outcome::TimedOut
        };
        Some(self.finish(outcome))
    }

    const fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.phase = RoundPhase::Resolved;
        self.outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_trims_surrounding_whitespace() {
        assert!(is_match(Some(" phrase "), "phrase"));
        assert!(is_match(Some("\tphrase\n"), "phrase"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_match(Some("Phrase"), "phrase"));
    }

    #[test]
    fn test_match_keeps_inner_whitespace() {
        assert!(!is_match(Some("Hakuna  Matata"), "Hakuna Matata"));
    }

    #[test]
    fn test_missing_input_never_matches() {
        assert!(!is_match(None, "phrase"));
        assert!(!is_match(Some(""), "phrase"));
        assert!(!is_match(Some("   "), "phrase"));
    }

    #[test]
    fn test_blank_answer_never_matches_blank_phrase() {
        assert!(!is_match(None, ""));
        assert!(!is_match(Some(""), ""));
        assert!(!is_match(Some("  \t"), ""));
        assert!(!is_match(Some(" "), " "));
    }

    #[test]
    fn test_timeout_without_input_on_blank_phrase() {
        let mut round = Round::start(1, "", 1);
        assert_eq!(round.tick(), TickResult::Expired);
        assert_eq!(round.expire(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_match_unicode() {
        assert!(is_match(Some("¡Hadouken!"), "¡Hadouken!"));
        assert!(!is_match(Some("Hadouken!"), "¡Hadouken!"));
    }

    #[test]
    fn test_progress_clamped() {
        assert!((progress(20, 20) - 1.0).abs() < f64::EPSILON);
        assert!((progress(5, 20) - 0.25).abs() < f64::EPSILON);
        assert!((progress(0, 20)).abs() < f64::EPSILON);
        assert!((progress(40, 20) - 1.0).abs() < f64::EPSILON);
        assert!((progress(3, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_start_state() {
        let round = Round::start(1, "hola", 20);
        assert_eq!(round.phase(), RoundPhase::AwaitingInput);
        assert_eq!(round.remaining_secs(), 20);
        assert_eq!(round.elapsed_secs(), 0);
        assert!(round.outcome().is_none());
        assert!(round.staged().is_none());
    }

    #[test]
    fn test_tick_counts_down_to_expiry() {
        let mut round = Round::start(1, "hola", 3);
        assert_eq!(round.tick(), TickResult::Running(2));
        assert_eq!(round.tick(), TickResult::Running(1));
        assert_eq!(round.tick(), TickResult::Expired);
        assert_eq!(round.remaining_secs(), 0);
        assert_eq!(round.elapsed_secs(), 3);
    }

    #[test]
    fn test_submit_correct() {
        let mut round = Round::start(1, "hola", 20);
        assert_eq!(round.submit(Some("hola ")), Some(Outcome::Correct));
        assert_eq!(round.phase(), RoundPhase::Resolved);
        assert_eq!(round.outcome(), Some(Outcome::Correct));
    }

    #[test]
    fn test_submit_incorrect() {
        let mut round = Round::start(1, "hola", 20);
        assert_eq!(round.submit(Some("Hola")), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_resolved_round_ignores_further_input() {
        let mut round = Round::start(1, "hola", 2);
        round.submit(Some("nope"));
        assert_eq!(round.submit(Some("hola")), None);
        assert_eq!(round.expire(), None);
        assert_eq!(round.tick(), TickResult::Ignored);
        round.stage("hola");
        assert!(round.staged().is_none());
        assert_eq!(round.outcome(), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_timeout_with_empty_input() {
        let mut round = Round::start(1, "hola", 1);
        assert_eq!(round.tick(), TickResult::Expired);
        assert_eq!(round.expire(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_timeout_with_matching_staged_input() {
        let mut round = Round::start(1, "hola", 1);
        round.stage("  hola");
        assert_eq!(round.expire(), Some(Outcome::CorrectAtTimeout));
        assert!(Outcome::CorrectAtTimeout.is_success());
    }

    #[test]
    fn test_timeout_with_wrong_staged_input() {
        let mut round = Round::start(1, "hola", 1);
        round.stage("hol");
        assert_eq!(round.expire(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_outcome_messages_distinct() {
        let all = [
            Outcome::Correct,
            Outcome::CorrectAtTimeout,
            Outcome::Incorrect,
            Outcome::TimedOut,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::CorrectAtTimeout).unwrap();
        assert_eq!(json, "\"correct_at_timeout\"");
        assert_eq!(Outcome::TimedOut.to_string(), "timed_out");
    }
}
