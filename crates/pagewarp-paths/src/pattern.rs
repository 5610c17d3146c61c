//! Path pattern sources.

use std::fmt;

use regex::Regex;

/// A path pattern as written by the user.
///
/// Most patterns are string templates (`/blog/:slug`). A raw [`Regex`] can be
/// used when the template syntax is not expressive enough, and a list of
/// patterns matches when any member matches.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// A template string, see [`crate::tokens`] for the syntax.
    Template(String),
    /// A regular expression used as-is. Capture groups become parameters,
    /// keyed by group name or by position among unnamed groups.
    Regex(Regex),
    /// Alternatives, tried in order.
    List(Vec<PathPattern>),
}

impl PathPattern {
    /// Returns the template string, if this is a template.
    pub fn as_template(&self) -> Option<&str> {
        match self {
            Self::Template(t) => Some(t),
            Self::Regex(_) | Self::List(_) => None,
        }
    }

    /// Returns `true` if this is a template whose source text equals `name`.
    ///
    /// This is a literal string comparison, not a match.
    pub fn is_literally(&self, name: &str) -> bool {
        self.as_template() == Some(name)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.write_str(t),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for PathPattern {
    fn from(template: &str) -> Self {
        Self::Template(template.to_string())
    }
}

impl From<String> for PathPattern {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}

impl From<Regex> for PathPattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

impl<T: Into<Self>> From<Vec<T>> for PathPattern {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
