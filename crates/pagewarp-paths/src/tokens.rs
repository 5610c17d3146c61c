//! Tokenizing and parsing of path templates.
//!
//! A template such as `/blog/:slug` or `/files/{:name.}?(.*)` is split into
//! literal text and parameter keys. The grammar:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `:name` | Named parameter (word characters) |
//! | `:name(re)` | Named parameter with a custom pattern |
//! | `(re)` | Unnamed parameter, keyed by a running index |
//! | `?` `*` `+` | Optional, zero-or-more, one-or-more (after a parameter or group) |
//! | `{...}` | Group with its own prefix and suffix text |
//! | `\c` | Literal `c` |
//!
//! A `/` or `.` written directly before a parameter becomes that parameter's
//! prefix, so `/users/:id?` also matches `/users`.

use std::fmt;

use pagewarp_core::{PagewarpError, PagewarpResult};

/// Characters that are absorbed into a following parameter as its prefix.
const PREFIXES: &str = "./";

/// How many times a parameter may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    /// Exactly once.
    #[default]
    Once,
    /// `?`: zero or one time.
    Optional,
    /// `*`: zero or more times.
    ZeroOrMore,
    /// `+`: one or more times.
    OneOrMore,
}

impl Modifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::Optional),
            '*' => Some(Self::ZeroOrMore),
            '+' => Some(Self::OneOrMore),
            _ => None,
        }
    }

    /// Returns the regex quantifier for this modifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Once => "",
            Self::Optional => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }

    /// Returns `true` for `*` and `+`.
    pub const fn is_repeating(self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }
}

/// The name under which a parameter's value is reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// A `:name` parameter.
    Named(String),
    /// An unnamed `(re)` group, numbered from zero in order of appearance.
    Index(usize),
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A capturing parameter in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// The parameter name.
    pub name: KeyName,
    /// Literal text required before the value.
    pub prefix: String,
    /// Literal text required after the value.
    pub suffix: String,
    /// The regex the value must match.
    pub pattern: String,
    /// Repetition modifier.
    pub modifier: Modifier,
}

/// A parsed template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text.
    Literal(String),
    /// A capturing parameter.
    Key(Key),
    /// A brace group with no parameter, e.g. `{/index}?`.
    Group {
        /// The group's literal text.
        text: String,
        /// Repetition modifier.
        modifier: Modifier,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexKind {
    Open,
    Close,
    Pattern,
    Name,
    Char,
    EscapedChar,
    Modifier,
    End,
}

impl fmt::Display for LexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Pattern => "PATTERN",
            Self::Name => "NAME",
            Self::Char => "CHAR",
            Self::EscapedChar => "ESCAPED_CHAR",
            Self::Modifier => "MODIFIER",
            Self::End => "END",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
struct Lexeme {
    kind: LexKind,
    index: usize,
    value: String,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lex(template: &str) -> PagewarpResult<Vec<Lexeme>> {
    let chars: Vec<char> = template.chars().collect();
    let err = |reason: String| PagewarpError::invalid_pattern(template, reason);
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let kind = match c {
            '*' | '+' | '?' => LexKind::Modifier,
            '{' => LexKind::Open,
            '}' => LexKind::Close,
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| err(format!("Trailing escape at {i}")))?;
                out.push(Lexeme {
                    kind: LexKind::EscapedChar,
                    index: i,
                    value: escaped.to_string(),
                });
                i += 2;
                continue;
            }
            ':' => {
                let start = i + 1;
                let mut j = start;
                while j < chars.len() && is_name_char(chars[j]) {
                    j += 1;
                }
                if j == start {
                    return Err(err(format!("Missing parameter name at {i}")));
                }
                out.push(Lexeme {
                    kind: LexKind::Name,
                    index: i,
                    value: chars[start..j].iter().collect(),
                });
                i = j;
                continue;
            }
            '(' => {
                let (pattern, next) = lex_pattern(&chars, i).map_err(err)?;
                out.push(Lexeme {
                    kind: LexKind::Pattern,
                    index: i,
                    value: pattern,
                });
                i = next;
                continue;
            }
            _ => LexKind::Char,
        };
        out.push(Lexeme {
            kind,
            index: i,
            value: c.to_string(),
        });
        i += 1;
    }

    out.push(Lexeme {
        kind: LexKind::End,
        index: i,
        value: String::new(),
    });
    Ok(out)
}

/// Reads a balanced `( ... )` group starting at `open`. Returns the inner
/// pattern and the index just past the closing parenthesis.
fn lex_pattern(chars: &[char], open: usize) -> Result<(String, usize), String> {
    let mut depth = 1;
    let mut pattern = String::new();
    let mut j = open + 1;

    if chars.get(j) == Some(&'?') {
        return Err(format!("Pattern cannot start with \"?\" at {j}"));
    }

    while j < chars.len() {
        match chars[j] {
            '\\' => {
                pattern.push('\\');
                if let Some(&next) = chars.get(j + 1) {
                    pattern.push(next);
                }
                j += 2;
                continue;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    j += 1;
                    break;
                }
            }
            '(' => {
                depth += 1;
                if chars.get(j + 1) != Some(&'?') {
                    return Err(format!("Capturing groups are not allowed at {j}"));
                }
            }
            _ => {}
        }
        pattern.push(chars[j]);
        j += 1;
    }

    if depth != 0 {
        return Err(format!("Unbalanced pattern at {open}"));
    }
    if pattern.is_empty() {
        return Err(format!("Missing pattern at {open}"));
    }
    Ok((pattern, j))
}

struct Parser<'a> {
    template: &'a str,
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl Parser<'_> {
    fn try_consume(&mut self, kind: LexKind) -> Option<String> {
        let lexeme = self.lexemes.get(self.pos)?;
        if lexeme.kind == kind {
            self.pos += 1;
            Some(lexeme.value.clone())
        } else {
            None
        }
    }

    fn must_consume(&mut self, kind: LexKind) -> PagewarpResult<String> {
        if let Some(value) = self.try_consume(kind) {
            return Ok(value);
        }
        let (found, index) = self
            .lexemes
            .get(self.pos)
            .map_or((LexKind::End, self.template.len()), |l| (l.kind, l.index));
        Err(PagewarpError::invalid_pattern(
            self.template,
            format!("Unexpected {found} at {index}, expected {kind}"),
        ))
    }

    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(value) = self
            .try_consume(LexKind::Char)
            .or_else(|| self.try_consume(LexKind::EscapedChar))
        {
            text.push_str(&value);
        }
        text
    }

    fn consume_modifier(&mut self) -> Modifier {
        self.try_consume(LexKind::Modifier)
            .and_then(|m| m.chars().next())
            .and_then(Modifier::from_char)
            .unwrap_or_default()
    }
}

/// Parses a path template into tokens.
///
/// `delimiter` is the set of segment delimiter characters; it determines the
/// default pattern for parameters without an explicit one. With no
/// delimiters a parameter matches any non-empty text.
///
/// # Errors
///
/// Returns [`PagewarpError::InvalidPattern`] for unbalanced or empty
/// patterns, capturing groups inside a pattern, a `:` without a name, an
/// unclosed `{`, or a stray `}`.
pub fn parse(template: &str, delimiter: &str) -> PagewarpResult<Vec<Token>> {
    let default_pattern = if delimiter.is_empty() {
        String::from("[\\s\\S]+?")
    } else {
        format!("[^{}]+?", regex::escape(delimiter))
    };
    let mut parser = Parser {
        template,
        lexemes: lex(template)?,
        pos: 0,
    };
    let mut tokens = Vec::new();
    let mut path = String::new();
    let mut next_index = 0;

    while parser.pos < parser.lexemes.len() {
        let ch = parser.try_consume(LexKind::Char);
        let name = parser.try_consume(LexKind::Name);
        let pattern = parser.try_consume(LexKind::Pattern);

        if name.is_some() || pattern.is_some() {
            let mut prefix = ch.unwrap_or_default();
            if !prefix.is_empty() && !PREFIXES.contains(prefix.as_str()) {
                path.push_str(&prefix);
                prefix.clear();
            }
            if !path.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut path)));
            }
            let name = name.map_or_else(
                || {
                    next_index += 1;
                    KeyName::Index(next_index - 1)
                },
                KeyName::Named,
            );
            tokens.push(Token::Key(Key {
                name,
                prefix,
                suffix: String::new(),
                pattern: pattern.unwrap_or_else(|| default_pattern.clone()),
                modifier: parser.consume_modifier(),
            }));
            continue;
        }

        if let Some(value) = ch.or_else(|| parser.try_consume(LexKind::EscapedChar)) {
            path.push_str(&value);
            continue;
        }

        if !path.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut path)));
        }

        if parser.try_consume(LexKind::Open).is_some() {
            let prefix = parser.consume_text();
            let name = parser.try_consume(LexKind::Name);
            let pattern = parser.try_consume(LexKind::Pattern);
            let suffix = parser.consume_text();
            parser.must_consume(LexKind::Close)?;
            let modifier = parser.consume_modifier();

            let token = match (name, pattern) {
                (None, None) => Token::Group {
                    text: format!("{prefix}{suffix}"),
                    modifier,
                },
                (name, pattern) => {
                    let pattern = pattern.unwrap_or_else(|| default_pattern.clone());
                    let name = name.map_or_else(
                        || {
                            next_index += 1;
                            KeyName::Index(next_index - 1)
                        },
                        KeyName::Named,
                    );
                    Token::Key(Key {
                        name,
                        prefix,
                        suffix,
                        pattern,
                        modifier,
                    })
                }
            };
            tokens.push(token);
            continue;
        }

        parser.must_consume(LexKind::End)?;
    }

    Ok(tokens)
}
