//! CLI argument definitions
//!
//! All Clap derive structs for `TypeRush` command-line parsing.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::builder::TypedValueParser as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;
use crate::terminal::render::DEFAULT_WRAP_WIDTH;

// ============================================================================
// Root CLI
// ============================================================================

/// Timed typing-accuracy game for the terminal.
#[derive(Parser, Debug)]
#[command(name = "typerush", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// No diagnostics on stderr at all.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to use ANSI colors for feedback and logs.
    #[arg(long, default_value = "auto", global = true, env = "TYPERUSH_COLOR")]
    pub color: ColorChoice,

    /// Log output format on stderr.
    #[arg(long, default_value = "human", global = true, env = "TYPERUSH_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the game in this terminal.
    Play(PlayArgs),

    /// Print the phrase catalog.
    Phrases(PhrasesArgs),

    /// Print a shell completion script.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Play / Phrases
// ============================================================================

/// Arguments for `play`.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// YAML or JSON list of phrases to use instead of the built-in catalog.
    #[arg(short, long, env = "TYPERUSH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Seed for phrase selection, for reproducible sessions.
    #[arg(long, env = "TYPERUSH_SEED")]
    pub seed: Option<u64>,

    /// Write a JSONL event stream to this file.
    #[arg(long, env = "TYPERUSH_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Column at which long phrases wrap.
    #[arg(
        long,
        default_value_t = DEFAULT_WRAP_WIDTH,
        value_parser = clap::value_parser!(u16).range(10..).map(usize::from)
    )]
    pub wrap_width: usize,
}

/// Arguments for `phrases`.
#[derive(Args, Debug)]
pub struct PhrasesArgs {
    /// YAML or JSON list of phrases to print instead of the built-in catalog.
    #[arg(short, long, env = "TYPERUSH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color on a terminal unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Resolves the choice for a concrete output stream.
    ///
    /// `Auto` enables color only on a terminal and only when `NO_COLOR` is
    /// unset.
    #[must_use]
    pub fn enabled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Auto => stream.is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
