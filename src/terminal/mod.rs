//! Terminal front end
//!
//! Renders a [`Session`](crate::session::Session) as plain lines on stdout
//! and turns stdin lines into session commands.

pub mod input;
pub mod render;

pub use input::{parse_line, spawn_stdin_reader};
pub use render::TerminalPresenter;
