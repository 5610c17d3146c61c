//! # pagewarp
//!
//! Page transition animations for client-side routers, selected by matching
//! the URLs of each navigation against declared path patterns.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `pagewarp` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```
//! use std::sync::Arc;
//! use pagewarp::prelude::*;
//!
//! let settings = pagewarp::core::settings_loader::from_toml_str(
//!     r#"
//!     [match_options]
//!     sensitive = true
//!     "#,
//! )
//! .unwrap();
//!
//! let animations = vec![Animation::new("/", "/About").on_out(handler(|done, _| done.call()))];
//! let plugin = Arc::new(JsPlugin::new(Options::from_settings(animations, &settings)).unwrap());
//! assert!(plugin.animations()[0].matches_to("/about").is_none());
//!
//! let hooks = Hooks::new();
//! plugin.mount(&hooks);
//! assert!(hooks.is_replaced(HookName::AnimationOutAwait));
//! ```

/// Error types, settings, settings loading, and logging.
pub use pagewarp_core as core;

/// Path pattern compilation and matching.
#[cfg(feature = "paths")]
pub use pagewarp_paths as paths;

/// Animation compilation, ranking, and execution.
#[cfg(feature = "animations")]
pub use pagewarp_animations as animations;

/// Hook registry and the router plugin.
#[cfg(feature = "plugin")]
pub use pagewarp_plugin as plugin;

/// The most commonly used items.
pub mod prelude {
    pub use pagewarp_core::{MatchOptions, PagewarpError, PagewarpResult, Settings};

    #[cfg(feature = "paths")]
    pub use pagewarp_paths::{match_path, MatchResult, Matcher, PathPattern};

    #[cfg(feature = "animations")]
    pub use pagewarp_animations::handler::{async_handler, handler};
    #[cfg(feature = "animations")]
    pub use pagewarp_animations::{Animation, AnimationData, Direction, Done, Visit};

    #[cfg(feature = "plugin")]
    pub use pagewarp_plugin::{HookArgs, HookName, Hooks, JsPlugin, Options};
}
