//! # pagewarp-paths
//!
//! Path pattern matching for pagewarp. Templates such as `/blog/:slug` or
//! `(.*)` compile once into a [`Matcher`], which maps a URL to either a
//! [`MatchResult`] carrying the extracted parameters or `None`.
//!
//! ## Modules
//!
//! - [`pattern`]: pattern sources (template, regex, or a list of either)
//! - [`tokens`]: template tokenizer and parser
//! - [`regexp`]: compilation of parsed templates into regexes
//! - [`matcher`]: compiled matchers and match results
//!
//! # Examples
//!
//! ```
//! use pagewarp_core::MatchOptions;
//! use pagewarp_paths::{match_path, PathPattern};
//!
//! let matcher = match_path(&PathPattern::from("/users/:id"), &MatchOptions::default()).unwrap();
//! let m = matcher.matches("/users/42").unwrap();
//! assert_eq!(m.params["id"], "42");
//! ```

pub mod matcher;
pub mod pattern;
pub mod regexp;
pub mod tokens;

pub use matcher::{match_path, MatchResult, Matcher, Params};
pub use pattern::PathPattern;
