//! Line-oriented terminal presenter.
//!
//! Output is appended line by line so it never fights with the player's
//! echoed input. The countdown is printed every [`COUNTDOWN_EVERY_SECS`]
//! seconds and on each of the final [`COUNTDOWN_FINAL_SECS`] seconds rather
//! than on every tick.

use std::io::Write;

use crate::game::Outcome;
use crate::session::{Presenter, Summary, View};

/// Default wrap width for the phrase display, in columns.
pub const DEFAULT_WRAP_WIDTH: usize = 72;

/// Width of the progress bar, in cells.
pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Print the countdown whenever the remaining seconds are a multiple of this.
pub const COUNTDOWN_EVERY_SECS: u32 = 5;

/// Print the countdown on every tick once this few seconds remain.
pub const COUNTDOWN_FINAL_SECS: u32 = 3;

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Greedy word wrap, counting characters.
///
/// Lines break only at whitespace, and the whitespace at a break is
/// dropped. Whitespace inside a line is kept exactly as written, since the
/// player has to retype it. Words longer than `width` get a line of their
/// own rather than being split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    let mut rest = text;

    loop {
        let gap_end = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        let (gap, after) = rest.split_at(gap_end);
        if after.is_empty() {
            break;
        }
        let word_end = after.find(char::is_whitespace).unwrap_or(after.len());
        let (word, tail) = after.split_at(word_end);

        let gap_len = gap.chars().count();
        let word_len = word.chars().count();
        if line_len > 0 && line_len + gap_len + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        } else {
            line.push_str(gap);
            line_len += gap_len;
        }
        line.push_str(word);
        line_len += word_len;
        rest = tail;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Text progress bar, e.g. `[##########----------]` for `0.5`.
///
/// `progress` is clamped to `[0, 1]`.
#[must_use]
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Whether the countdown line should be printed at `remaining` seconds.
#[must_use]
pub const fn shows_countdown(remaining: u32) -> bool {
    remaining <= COUNTDOWN_FINAL_SECS || remaining % COUNTDOWN_EVERY_SECS == 0
}

/// [`Presenter`] writing plain lines to any [`Write`].
pub struct TerminalPresenter<W> {
    out: W,
    wrap_width: usize,
    color: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    /// Presenter on stdout.
    #[must_use]
    pub fn stdout(wrap_width: usize, color: bool) -> Self {
        Self::new(std::io::stdout(), wrap_width, color)
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter on an arbitrary writer.
    #[must_use]
    pub const fn new(out: W, wrap_width: usize, color: bool) -> Self {
        Self {
            out,
            wrap_width,
            color,
        }
    }

    /// Consumes the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn countdown_line(&mut self, view: &View<'_>) -> std::io::Result<()> {
        writeln!(
            self.out,
            "  {} {:>2}s",
            progress_bar(view.progress, PROGRESS_BAR_WIDTH),
            view.remaining_secs
        )
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn round_started(&mut self, view: &View<'_>) -> std::io::Result<()> {
        writeln!(self.out)?;
        let header = format!(
            "Level {}  streak {}  {}s",
            view.level, view.streak, view.budget_secs
        );
        let header = self.paint(BOLD, &header);
        writeln!(self.out, "{header}")?;
        for line in wrap(view.phrase, self.wrap_width) {
            writeln!(self.out, "    {line}")?;
        }
        self.countdown_line(view)?;
        self.out.flush()
    }

    fn countdown(&mut self, view: &View<'_>) -> std::io::Result<()> {
        if shows_countdown(view.remaining_secs) {
            self.countdown_line(view)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn resolved(&mut self, outcome: Outcome, _view: &View<'_>) -> std::io::Result<()> {
        let style = if outcome.is_success() { GREEN } else { RED };
        let line = self.paint(style, outcome.message());
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn finished(&mut self, summary: &Summary) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Game over ({}): {} rounds, {} correct, highest level {}",
            summary.reason, summary.rounds_played, summary.rounds_won, summary.highest_level
        )?;
        self.out.flush()
    }
}

impl<W> std::fmt::Debug for TerminalPresenter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter")
            .field("wrap_width", &self.wrap_width)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
