//! Settings for pagewarp.
//!
//! This module provides the [`Settings`] struct, which holds logging
//! configuration and the [`MatchOptions`] threaded into every path matcher.
//! Settings are plain values: build them once, then pass them by reference.

use serde::{Deserialize, Serialize};

/// The characters that separate path segments by default.
pub const DEFAULT_DELIMITER: &str = "/#?";

/// Options controlling how path patterns are compiled and matched.
///
/// These are passed through unchanged to both the `from` and `to` matcher of
/// every animation.
///
/// # Examples
///
/// ```
/// use pagewarp_core::settings::MatchOptions;
///
/// let options = MatchOptions::default();
/// assert!(!options.sensitive);
/// assert!(options.end);
/// assert_eq!(options.delimiter, "/#?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MatchOptions {
    /// Match case-sensitively.
    pub sensitive: bool,
    /// Disallow the optional trailing delimiter.
    pub strict: bool,
    /// Anchor the match at the end of the URL.
    pub end: bool,
    /// Anchor the match at the start of the URL.
    pub start: bool,
    /// Characters treated as segment delimiters.
    pub delimiter: String,
    /// Percent-decode captured parameter values.
    pub decode: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            end: true,
            start: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
            decode: true,
        }
    }
}

/// Top-level pagewarp settings.
///
/// # Examples
///
/// ```
/// use pagewarp_core::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.log_level, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Controls the log output format.
    pub debug: bool,
    /// The log filter directive (e.g. "info", "`pagewarp_animations=debug`").
    pub log_level: String,
    /// Options passed to every path matcher.
    pub match_options: MatchOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            match_options: MatchOptions::default(),
        }
    }
}
