//! Game core
//!
//! The pieces a front end drives to run the typing game.
//!
//! # Architecture
//!
//! - [`GameState`] - Level, streak, and per-round time budget
//! - [`PhraseSource`] - Fixed catalog with uniform random selection
//! - [`Round`] - One phrase/countdown/answer cycle and its judging rules
//! - [`Countdown`] - Single cancellable 1 Hz ticker with generation-tagged ticks

pub mod countdown;
pub mod phrases;
pub mod round;
pub mod state;

pub use countdown::{Countdown, Tick};
pub use phrases::PhraseSource;
pub use round::{Outcome, Round, RoundPhase, TickResult};
pub use state::GameState;
