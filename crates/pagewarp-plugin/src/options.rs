//! Plugin options and their accepted input shapes.

use pagewarp_animations::Animation;
use pagewarp_core::{MatchOptions, Settings};

/// Resolved plugin options.
///
/// Options are fixed once the plugin is constructed.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Declared animations, in priority order for ties.
    pub animations: Vec<Animation>,
    /// Passed through to the path matcher for every pattern.
    pub match_options: MatchOptions,
}

impl Options {
    /// Creates options for a list of animations with default matching.
    pub fn new(animations: Vec<Animation>) -> Self {
        Self {
            animations,
            match_options: MatchOptions::default(),
        }
    }

    /// Creates options that take their matching rules from loaded settings.
    pub fn from_settings(animations: Vec<Animation>, settings: &Settings) -> Self {
        Self {
            animations,
            match_options: settings.match_options.clone(),
        }
    }

    /// Replaces the match options.
    #[must_use]
    pub fn with_match_options(mut self, match_options: MatchOptions) -> Self {
        self.match_options = match_options;
        self
    }
}

/// What a plugin can be constructed from.
///
/// A bare list of animations is accepted as shorthand for
/// `Options { animations, ..Default::default() }`.
#[derive(Debug, Clone)]
pub enum InitOptions {
    /// Only the animations.
    List(Vec<Animation>),
    /// Full options.
    Options(Options),
}

impl InitOptions {
    /// Normalizes the input into [`Options`].
    pub fn into_options(self) -> Options {
        match self {
            Self::List(animations) => Options::new(animations),
            Self::Options(options) => options,
        }
    }
}

impl From<Vec<Animation>> for InitOptions {
    fn from(animations: Vec<Animation>) -> Self {
        Self::List(animations)
    }
}

impl From<Options> for InitOptions {
    fn from(options: Options) -> Self {
        Self::Options(options)
    }
}
