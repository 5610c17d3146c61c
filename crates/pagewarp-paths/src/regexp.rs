//! Compilation of parsed templates into regular expressions.

use std::fmt::Write as _;

use pagewarp_core::MatchOptions;

use super::tokens::{Key, Token};

/// The regex source for a template together with the keys of its capture
/// groups, in group order.
#[derive(Debug, Clone)]
pub struct TemplateRegex {
    /// Regex source, without case flags.
    pub source: String,
    /// One key per capture group.
    pub keys: Vec<Key>,
    /// When matching without an end anchor, the match must be followed by a
    /// delimiter or the end of input. The regex engine has no lookahead, so
    /// the source ends in one extra capture group that consumes that
    /// boundary; it is not part of the matched path.
    pub boundary_group: bool,
}

/// Builds the regex source for the given tokens.
///
/// Parameters compile to one capture group each. Without `strict`, a single
/// trailing delimiter is tolerated. An empty delimiter set means no character
/// separates segments.
pub fn tokens_to_regex(tokens: &[Token], options: &MatchOptions) -> TemplateRegex {
    let delimiter_class = (!options.delimiter.is_empty())
        .then(|| format!("[{}]", regex::escape(&options.delimiter)));
    let mut source = String::new();
    let mut keys = Vec::new();

    if options.start {
        source.push('^');
    }

    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Group { text, modifier } => {
                write!(source, "(?:{}){}", regex::escape(text), modifier.as_str()).ok();
            }
            Token::Key(key) => {
                push_key(&mut source, key);
                keys.push(key.clone());
            }
        }
    }

    let mut boundary_group = false;
    if options.end {
        if let (false, Some(class)) = (options.strict, &delimiter_class) {
            write!(source, "{class}?").ok();
        }
        source.push('$');
    } else {
        if let (false, Some(class)) = (options.strict, &delimiter_class) {
            write!(source, "(?:{class}$)?").ok();
        }
        if !is_end_delimited(tokens, &options.delimiter) {
            match &delimiter_class {
                Some(class) => write!(source, "({class}|$)").ok(),
                None => write!(source, "($)").ok(),
            };
            boundary_group = true;
        }
    }

    TemplateRegex {
        source,
        keys,
        boundary_group,
    }
}

fn push_key(source: &mut String, key: &Key) {
    let prefix = regex::escape(&key.prefix);
    let suffix = regex::escape(&key.suffix);
    let pattern = &key.pattern;
    let modifier = key.modifier.as_str();

    if prefix.is_empty() && suffix.is_empty() {
        if key.modifier.is_repeating() {
            write!(source, "((?:{pattern}){modifier})").ok();
        } else {
            write!(source, "({pattern}){modifier}").ok();
        }
    } else if key.modifier.is_repeating() {
        let optional = if modifier == "*" { "?" } else { "" };
        write!(
            source,
            "(?:{prefix}((?:{pattern})(?:{suffix}{prefix}(?:{pattern}))*){suffix}){optional}"
        )
        .ok();
    } else {
        write!(source, "(?:{prefix}({pattern}){suffix}){modifier}").ok();
    }
}

/// A template is end-delimited when it is empty or its last literal ends in
/// a delimiter character.
fn is_end_delimited(tokens: &[Token], delimiter: &str) -> bool {
    match tokens.last() {
        None => true,
        Some(Token::Literal(text)) => text.chars().last().is_some_and(|c| delimiter.contains(c)),
        Some(_) => false,
    }
}
