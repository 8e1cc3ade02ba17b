//! `TypeRush` - Timed typing-accuracy game
//!
//! A phrase is shown and the player must retype it exactly before the
//! countdown runs out. Correct answers raise the level, and every fifth
//! answer in a row shortens the countdown. Misses only cost the streak.
//!
//! The [`game`] module holds the rules, [`session`] drives rounds against
//! any [`session::Presenter`], and [`terminal`] is the bundled front end.

pub mod cli;
pub mod error;
pub mod game;
pub mod observability;
pub mod session;
pub mod terminal;
