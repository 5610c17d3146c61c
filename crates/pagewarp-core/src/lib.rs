//! # pagewarp-core
//!
//! Core types, settings, and error types for pagewarp.
//! This crate has no dependencies on the other pagewarp crates and provides
//! the foundation for all of them.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Settings and path matching options
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{PagewarpError, PagewarpResult};
pub use settings::{MatchOptions, Settings};
