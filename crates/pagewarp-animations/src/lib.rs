//! # pagewarp-animations
//!
//! Page transition animations keyed by URL patterns. Each [`Animation`]
//! pairs a `from` and a `to` pattern with optional out and in handlers.
//! For a [`Visit`], every compiled animation is rated and the best one runs.
//!
//! ## Modules
//!
//! - [`visit`] - The navigation being animated
//! - [`handler`] - Handler types, directions, and the [`Done`] callback
//! - [`animation`] - Declarations and compilation
//! - [`rank`] - Rating and selection
//! - [`data`] - The payload passed to handlers
//! - [`runner`] - Running a handler to completion
//!
//! # Examples
//!
//! ```
//! use pagewarp_animations::{compile_animations, find_animation_for_visit, Animation, Visit};
//! use pagewarp_core::MatchOptions;
//!
//! let animations = compile_animations(
//!     &[Animation::new("/", "/about"), Animation::fallback()],
//!     &MatchOptions::default(),
//! )
//! .unwrap();
//!
//! let selected = find_animation_for_visit(&animations, &Visit::new("/", "/about")).unwrap();
//! assert_eq!(selected.to_pattern().to_string(), "/about");
//! ```

pub mod animation;
pub mod data;
pub mod handler;
pub mod rank;
pub mod runner;
pub mod visit;

pub use animation::{compile_animation, compile_animations, Animation, CompiledAnimation};
pub use data::{assemble_animation_data, AnimationData, RouteData};
pub use handler::{AnimationHandler, BoxFuture, Direction, Done};
pub use rank::{
    find_animation, find_animation_for_visit, find_animation_index, rate_animation, MAX_RATING,
};
pub use runner::run_animation;
pub use visit::{Visit, VisitAnimation, VisitFrom, VisitTo};
