//! Command-line interface
//!
//! Argument parsing and command handlers for the `typerush` binary.

pub mod args;
pub mod commands;
