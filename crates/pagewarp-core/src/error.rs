//! Core error types for pagewarp.
//!
//! This module provides [`PagewarpError`], the single error enum shared by
//! every pagewarp crate. Only construction-time failures are errors: a
//! missing animation handler or an empty ranking is handled in-band and never
//! produces one of these.

use thiserror::Error;

/// The primary error type for pagewarp.
#[derive(Error, Debug)]
pub enum PagewarpError {
    // ── Patterns ─────────────────────────────────────────────────────

    /// A path pattern could not be parsed or compiled.
    #[error("Invalid path pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern source as written by the user.
        pattern: String,
        /// What was wrong with it.
        reason: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PagewarpError {
    /// Creates an [`PagewarpError::InvalidPattern`] for the given pattern source.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short, stable code identifying the error kind.
    ///
    /// Hosts that forward errors across a language boundary can match on
    /// this instead of the display string.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::ConfigurationError(_) => "configuration",
            Self::SerializationError(_) => "serialization",
            Self::IoError(_) => "io",
        }
    }
}

/// A convenience type alias for `Result<T, PagewarpError>`.
pub type PagewarpResult<T> = Result<T, PagewarpError>;
