//! Navigation visits.
//!
//! A [`Visit`] is created by the host router for every navigation and handed
//! to pagewarp by reference. Nothing in this crate mutates it.

use serde::{Deserialize, Serialize};

/// The page a visit starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitFrom {
    /// The current URL.
    pub url: String,
}

/// The page a visit navigates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitTo {
    /// The next URL.
    pub url: String,
}

/// Animation-related visit settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitAnimation {
    /// A named transition requested for this visit, e.g. via a link attribute.
    #[serde(default)]
    pub name: Option<String>,
}

/// A single navigation from one URL to another.
///
/// # Examples
///
/// ```
/// use pagewarp_animations::Visit;
///
/// let visit = Visit::new("/", "/about").with_animation_name("slide");
/// assert_eq!(visit.from.url, "/");
/// assert_eq!(visit.animation.name.as_deref(), Some("slide"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Origin.
    pub from: VisitFrom,
    /// Destination.
    pub to: VisitTo,
    /// Animation settings.
    #[serde(default)]
    pub animation: VisitAnimation,
}

impl Visit {
    /// Creates a visit with no named transition.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: VisitFrom { url: from.into() },
            to: VisitTo { url: to.into() },
            animation: VisitAnimation::default(),
        }
    }

    /// Sets the named transition.
    #[must_use]
    pub fn with_animation_name(mut self, name: impl Into<String>) -> Self {
        self.animation.name = Some(name.into());
        self
    }
}
