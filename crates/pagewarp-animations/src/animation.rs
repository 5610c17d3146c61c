//! Animation declarations and their compiled form.

use std::fmt;

use pagewarp_core::{MatchOptions, PagewarpResult};
use pagewarp_paths::{match_path, MatchResult, Matcher, PathPattern};

use crate::handler::{immediate, AnimationHandler, Direction};

/// An animation as declared by the user.
///
/// Handlers are optional at declaration time. A missing handler is only
/// noticed when its phase runs, and is then treated as finishing at once.
///
/// # Examples
///
/// ```
/// use pagewarp_animations::{handler::handler, Animation};
///
/// let animation = Animation::new("/blog", "/blog/:slug")
///     .on_out(handler(|done, _| done.call()))
///     .on_in(handler(|done, _| done.call()));
/// assert_eq!(animation.to.to_string(), "/blog/:slug");
/// ```
#[derive(Clone)]
pub struct Animation {
    /// Pattern for the URL being left.
    pub from: PathPattern,
    /// Pattern for the URL being entered.
    pub to: PathPattern,
    /// Handler for the exit phase.
    pub out_handler: Option<AnimationHandler>,
    /// Handler for the entry phase.
    pub in_handler: Option<AnimationHandler>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("out", &self.out_handler.is_some())
            .field("in", &self.in_handler.is_some())
            .finish()
    }
}

impl Animation {
    /// Creates an animation with no handlers.
    pub fn new(from: impl Into<PathPattern>, to: impl Into<PathPattern>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            out_handler: None,
            in_handler: None,
        }
    }

    /// The animation used when nothing else matches: `(.*)` to `(.*)`, with
    /// both handlers finishing immediately.
    pub fn fallback() -> Self {
        Self::new("(.*)", "(.*)")
            .on_out(immediate())
            .on_in(immediate())
    }

    /// Sets the exit handler.
    #[must_use]
    pub fn on_out(mut self, handler: AnimationHandler) -> Self {
        self.out_handler = Some(handler);
        self
    }

    /// Sets the entry handler.
    #[must_use]
    pub fn on_in(mut self, handler: AnimationHandler) -> Self {
        self.in_handler = Some(handler);
        self
    }

    /// Returns the handler for a direction.
    pub const fn handler(&self, direction: Direction) -> Option<&AnimationHandler> {
        match direction {
            Direction::In => self.in_handler.as_ref(),
            Direction::Out => self.out_handler.as_ref(),
        }
    }
}

/// An [`Animation`] with its patterns compiled to matchers.
#[derive(Clone)]
pub struct CompiledAnimation {
    animation: Animation,
    from_matcher: Matcher,
    to_matcher: Matcher,
}

impl fmt::Debug for CompiledAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAnimation")
            .field("animation", &self.animation)
            .field("from_matcher", &self.from_matcher)
            .field("to_matcher", &self.to_matcher)
            .finish()
    }
}

impl CompiledAnimation {
    /// The declaration this was compiled from.
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The raw `from` pattern.
    pub const fn from_pattern(&self) -> &PathPattern {
        &self.animation.from
    }

    /// The raw `to` pattern.
    pub const fn to_pattern(&self) -> &PathPattern {
        &self.animation.to
    }

    /// Returns the handler for a direction.
    pub const fn handler(&self, direction: Direction) -> Option<&AnimationHandler> {
        self.animation.handler(direction)
    }

    /// Matches a URL against the `from` pattern.
    pub fn matches_from(&self, url: &str) -> Option<MatchResult> {
        self.from_matcher.matches(url)
    }

    /// Matches a URL against the `to` pattern.
    pub fn matches_to(&self, url: &str) -> Option<MatchResult> {
        self.to_matcher.matches(url)
    }
}

/// Compiles one animation. The handlers are shared with the declaration.
///
/// # Errors
///
/// Returns [`PagewarpError::InvalidPattern`](pagewarp_core::PagewarpError::InvalidPattern)
/// if either pattern is invalid.
pub fn compile_animation(
    animation: &Animation,
    options: &MatchOptions,
) -> PagewarpResult<CompiledAnimation> {
    let from_matcher = match_path(&animation.from, options)?;
    let to_matcher = match_path(&animation.to, options)?;
    Ok(CompiledAnimation {
        animation: animation.clone(),
        from_matcher,
        to_matcher,
    })
}

/// Compiles every animation, preserving order.
///
/// # Errors
///
/// Returns the first pattern error encountered.
pub fn compile_animations(
    animations: &[Animation],
    options: &MatchOptions,
) -> PagewarpResult<Vec<CompiledAnimation>> {
    let compiled = animations
        .iter()
        .map(|animation| compile_animation(animation, options))
        .collect::<PagewarpResult<Vec<_>>>()?;
    tracing::debug!(count = compiled.len(), "compiled animations");
    Ok(compiled)
}
