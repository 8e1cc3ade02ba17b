//! Level, streak, and time-budget bookkeeping.
//!
//! The difficulty curve is a step function of the streak,
//! `max(2, 20 - 2 * floor(streak / 5))`, but it is applied incrementally:
//! losing the streak restarts the count toward the next step without giving
//! back any time already taken away. Only [`GameState::reset`] raises the
//! budget again.

/// Seconds allotted to a round at level 1.
pub const INITIAL_TIME_BUDGET_SECS: u32 = 20;

/// Seconds removed from the budget at each difficulty step.
pub const TIME_BUDGET_STEP_SECS: u32 = 2;

/// The budget never drops below this.
pub const MIN_TIME_BUDGET_SECS: u32 = 2;

/// Consecutive correct answers needed for one difficulty step.
pub const STREAK_INTERVAL: u32 = 5;

/// Mutable game progress for one session.
///
/// Counters saturate instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    level: u32,
    consecutive_correct: u32,
    time_budget_secs: u32,
}

impl GameState {
    /// Creates a fresh state at level 1 with the full time budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: 1,
            consecutive_correct: 0,
            time_budget_secs: INITIAL_TIME_BUDGET_SECS,
        }
    }

    /// Restores level 1, an empty streak and the initial budget.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Records a correct answer.
    ///
    /// Bumps the level and the streak, then shortens the budget when the
    /// new streak is a multiple of [`STREAK_INTERVAL`]. Returns `true` if
    /// the budget actually went down (it cannot once it sits at the floor).
    pub fn advance(&mut self) -> bool {
        self.level = self.level.saturating_add(1);
        self.consecutive_correct = self.consecutive_correct.saturating_add(1);

        if self.consecutive_correct % STREAK_INTERVAL != 0 {
            return false;
        }

        let before = self.time_budget_secs;
        self.time_budget_secs = before
            .saturating_sub(TIME_BUDGET_STEP_SECS)
            .max(MIN_TIME_BUDGET_SECS);
        self.time_budget_secs < before
    }

    /// Records a wrong or timed-out answer: the streak is lost, nothing else.
    pub const fn reset_streak(&mut self) {
        self.consecutive_correct = 0;
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Correct answers since the last failure or reset.
    #[must_use]
    pub const fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    /// Seconds allotted to the current round. Never below
    /// [`MIN_TIME_BUDGET_SECS`].
    #[must_use]
    pub const fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
