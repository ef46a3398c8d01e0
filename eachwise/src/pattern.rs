/// Case-equality patterns, and the matchers quantifiers and searches are
/// built on.
use std::fmt;

use tracing::warn;

use crate::traverse::{Block, Range, Stop};
use crate::value::{Kind, Value};

/// A pattern an element is tested against.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches elements loosely equal to the value.
    Value(Value),
    /// Matches elements of a kind.
    Kind(Kind),
    /// Matches numbers within the range.
    Range(Range),
    /// Matches strings and symbols the expression finds a match in.
    Regex(regex::Regex),
}

impl Pattern {
    /// The case-equality test.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Pattern::Value(pattern) => pattern.loose_eq(value),
            Pattern::Kind(Kind::Numeric) => matches!(value, Value::Integer(_) | Value::Float(_)),
            Pattern::Kind(kind) => value.kind() == *kind,
            Pattern::Range(range) => range.contains(value),
            Pattern::Regex(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
        }
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Value(value)
    }
}

impl From<Kind> for Pattern {
    fn from(kind: Kind) -> Self {
        Pattern::Kind(kind)
    }
}

impl From<Range> for Pattern {
    fn from(range: Range) -> Self {
        Pattern::Range(range)
    }
}

impl From<regex::Regex> for Pattern {
    fn from(regex: regex::Regex) -> Self {
        Pattern::Regex(regex)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Value(value) => write!(f, "{}", value),
            Pattern::Kind(kind) => write!(f, "{}", kind),
            Pattern::Range(range) => write!(f, "{}", range),
            Pattern::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// How an element is judged a match, resolved once per call.
#[derive(Debug)]
pub enum Matcher<'a, 'b> {
    /// The callback's result is truthy.
    Predicate(&'a Block<'b>),
    /// The pattern's case-equality test succeeds.
    Pattern(&'a Pattern),
    /// The element itself is truthy.
    Truthy,
}

impl<'a, 'b> Matcher<'a, 'b> {
    /// A pattern takes precedence over a callback.
    pub fn resolve(pattern: Option<&'a Pattern>, block: Option<&'a Block<'b>>) -> Self {
        match (pattern, block) {
            (Some(pattern), block) => {
                if block.is_some() {
                    warn!(%pattern, "given block not used");
                }
                Matcher::Pattern(pattern)
            }
            (None, Some(block)) => Matcher::Predicate(block),
            (None, None) => Matcher::Truthy,
        }
    }

    pub fn matches(&self, args: &[Value]) -> Result<bool, Stop> {
        match self {
            Matcher::Predicate(block) => Ok(block.call(args)?.is_truthy()),
            Matcher::Pattern(pattern) => Ok(pattern.matches(&Value::pack(args))),
            Matcher::Truthy => Ok(Value::pack(args).is_truthy()),
        }
    }
}
