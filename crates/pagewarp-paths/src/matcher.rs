//! Compiled matchers.
//!
//! [`match_path`] compiles a [`PathPattern`] once; the resulting [`Matcher`]
//! is immutable and can be applied to any number of URLs.

use std::collections::HashMap;
use std::fmt;

use percent_encoding::percent_decode_str;
use regex::{Regex, RegexBuilder};

use pagewarp_core::{MatchOptions, PagewarpError, PagewarpResult};

use crate::pattern::PathPattern;
use crate::regexp::tokens_to_regex;
use crate::tokens::{self, KeyName};

/// Parameters extracted from a URL, keyed by parameter name.
///
/// Unnamed groups are keyed by their index (`"0"`, `"1"`, ...). A repeated
/// parameter (`:path+`) holds the whole matched span, delimiters included.
pub type Params = HashMap<String, String>;

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The matched portion of the URL.
    pub path: String,
    /// Byte offset of the match in the URL.
    pub index: usize,
    /// Extracted parameters.
    pub params: Params,
}

/// A compiled regex plus the names of its capture groups.
#[derive(Clone)]
struct CompiledRegex {
    regex: Regex,
    names: Vec<KeyName>,
    /// The last capture group consumes the boundary after the match.
    boundary: bool,
    decode: bool,
}

impl CompiledRegex {
    fn matches(&self, url: &str) -> Option<MatchResult> {
        let captures = self.regex.captures(url)?;
        let full = captures.get(0)?;
        let end = if self.boundary {
            captures
                .get(self.names.len() + 1)
                .map_or(full.end(), |m| m.start())
        } else {
            full.end()
        };

        let params = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let value = captures.get(i + 1)?.as_str();
                Some((name.to_string(), self.decode_value(value)))
            })
            .collect();

        Some(MatchResult {
            path: url[full.start()..end].to_string(),
            index: full.start(),
            params,
        })
    }

    fn decode_value(&self, value: &str) -> String {
        if !self.decode {
            return value.to_string();
        }
        percent_decode_str(value)
            .decode_utf8()
            .map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
    }
}

#[derive(Clone)]
enum Inner {
    Regex(CompiledRegex),
    Any(Vec<Matcher>),
}

/// A compiled path pattern.
///
/// # Examples
///
/// ```
/// use pagewarp_core::MatchOptions;
/// use pagewarp_paths::{match_path, PathPattern};
///
/// let matcher = match_path(&PathPattern::from("from/:slug"), &MatchOptions::default()).unwrap();
/// let m = matcher.matches("from/test").unwrap();
/// assert_eq!(m.params["slug"], "test");
/// assert!(matcher.matches("to/test").is_none());
/// ```
#[derive(Clone)]
pub struct Matcher {
    source: String,
    inner: Inner,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Matcher");
        s.field("source", &self.source);
        match &self.inner {
            Inner::Regex(re) => s.field("regex", &re.regex.as_str()),
            Inner::Any(items) => s.field("alternatives", &items.len()),
        };
        s.finish()
    }
}

impl Matcher {
    /// Applies the matcher to a URL.
    ///
    /// Returns `None` when the URL does not match.
    pub fn matches(&self, url: &str) -> Option<MatchResult> {
        match &self.inner {
            Inner::Regex(re) => re.matches(url),
            Inner::Any(items) => items.iter().find_map(|m| m.matches(url)),
        }
    }

    /// Returns `true` if the URL matches.
    pub fn is_match(&self, url: &str) -> bool {
        self.matches(url).is_some()
    }

    /// Returns the pattern this matcher was compiled from, as displayed.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Compiles a path pattern into a [`Matcher`].
///
/// # Errors
///
/// Returns [`PagewarpError::InvalidPattern`] if a template cannot be parsed or
/// its generated regex does not compile.
pub fn match_path(pattern: &PathPattern, options: &MatchOptions) -> PagewarpResult<Matcher> {
    let inner = match pattern {
        PathPattern::Template(template) => Inner::Regex(compile_template(template, options)?),
        PathPattern::Regex(regex) => Inner::Regex(CompiledRegex {
            regex: regex.clone(),
            names: regex_group_names(regex),
            boundary: false,
            decode: options.decode,
        }),
        PathPattern::List(items) => Inner::Any(
            items
                .iter()
                .map(|item| match_path(item, options))
                .collect::<PagewarpResult<_>>()?,
        ),
    };

    tracing::trace!(pattern = %pattern, "compiled path matcher");
    Ok(Matcher {
        source: pattern.to_string(),
        inner,
    })
}

fn compile_template(template: &str, options: &MatchOptions) -> PagewarpResult<CompiledRegex> {
    let tokens = tokens::parse(template, &options.delimiter)?;
    let compiled = tokens_to_regex(&tokens, options);

    let regex = RegexBuilder::new(&compiled.source)
        .case_insensitive(!options.sensitive)
        .build()
        .map_err(|e| PagewarpError::invalid_pattern(template, format!("Invalid regex: {e}")))?;

    Ok(CompiledRegex {
        regex,
        names: compiled.keys.into_iter().map(|k| k.name).collect(),
        boundary: compiled.boundary_group,
        decode: options.decode,
    })
}

fn regex_group_names(regex: &Regex) -> Vec<KeyName> {
    let mut next_index = 0;
    regex
        .capture_names()
        .skip(1)
        .map(|name| {
            name.map_or_else(
                || {
                    next_index += 1;
                    KeyName::Index(next_index - 1)
                },
                |n| KeyName::Named(n.to_string()),
            )
        })
        .collect()
}
