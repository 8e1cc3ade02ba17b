//! Error types for `TypeRush`
//!
//! Gameplay failures (wrong answer, timeout) are ordinary state transitions
//! and never surface here. These errors cover what stops a session from
//! starting at all: a bad phrase catalog, or I/O on the terminal and the
//! events file.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes of the `typerush` binary.
pub struct ExitCode;

impl ExitCode {
    /// Session ended normally (quit, end of input, first Ctrl+C)
    pub const SUCCESS: i32 = 0;

    /// Unclassified failure
    pub const ERROR: i32 = 1;

    /// Configuration error (empty or unreadable phrase catalog)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (terminal closed, events file not writable)
    pub const IO_ERROR: i32 = 3;

    /// Command line rejected (`EX_USAGE`)
    pub const USAGE_ERROR: i32 = 64;

    /// Forced exit on a second SIGINT
    pub const INTERRUPTED: i32 = 130;

    /// Forced exit on a second SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `TypeRush` operations.
#[derive(Debug, Error)]
pub enum TypeRushError {
    /// Phrase catalog could not be built
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Terminal or events file failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TypeRushError {
    /// Exit code `main` uses for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Catalog Errors
// ============================================================================

/// Phrase catalog construction errors.
///
/// All of these are fatal: a session cannot start a round without a
/// usable catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog contains no phrases
    #[error("phrase catalog from {origin} is empty")]
    Empty {
        /// Where the catalog came from (`"built-in"` or a file path)
        origin: String,
    },

    /// An entry is empty or whitespace only, so no answer can match it
    #[error("phrase {index} in {origin} is blank")]
    BlankEntry {
        /// Where the catalog came from
        origin: String,
        /// Zero-based position of the entry
        index: usize,
    },

    /// Catalog file does not exist
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Catalog file is not a sequence of strings
    #[error("parse error in {origin}: {message}")]
    ParseError {
        /// Where the catalog came from
        origin: String,
        /// Error message from the parser
        message: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `TypeRush` operations.
pub type Result<T> = std::result::Result<T, TypeRushError>;

// ============================================================================
// Tests
// ============================================================================
