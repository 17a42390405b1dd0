//! Allow-list and ignore-list matching.
//!
//! Option values are written as plain strings. A string shaped like a
//! JavaScript regex literal (`/^webkit-/i`) becomes a pattern; anything else
//! is a literal compared by exact equality.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors building an allow-list from option values.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The pattern body is not a valid regular expression.
    #[error("Invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// An entry was not a string.
    #[error("Expected a string or pattern, got {value}")]
    NotAString {
        /// The offending value.
        value: String,
    },
}

/// One allow-list entry.
#[derive(Debug, Clone)]
pub enum AllowListEntry {
    /// Exact string match.
    Literal(String),
    /// Unanchored pattern search.
    Pattern(Regex),
}

impl AllowListEntry {
    /// Parses an entry, treating `/body/flags` as a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] if a pattern body does not compile.
    pub fn parse(entry: &str) -> Result<Self, MatcherError> {
        let Some((body, flags)) = split_pattern_literal(entry) else {
            return Ok(Self::Literal(entry.to_string()));
        };
        RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map(Self::Pattern)
            .map_err(|source| MatcherError::InvalidPattern {
                pattern: entry.to_string(),
                source,
            })
    }

    /// Tests a candidate against this entry.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Pattern(pattern) => pattern.is_match(candidate),
        }
    }
}

/// A list of entries; the first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: Vec<AllowListEntry>,
}

impl AllowList {
    /// Creates a list from parsed entries.
    #[must_use]
    pub fn new(entries: Vec<AllowListEntry>) -> Self {
        Self { entries }
    }

    /// Builds a list from an option value: a single string or an array of strings.
    ///
    /// # Errors
    ///
    /// Returns an error for non-string entries or patterns that do not compile.
    pub fn from_value(value: &toml::Value) -> Result<Self, MatcherError> {
        let values = match value {
            toml::Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        let entries = values
            .iter()
            .map(|v| match v.as_str() {
                Some(s) => AllowListEntry::parse(s),
                None => Err(MatcherError::NotAString {
                    value: v.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Returns the entries.
    #[must_use]
    pub fn entries(&self) -> &[AllowListEntry] {
        &self.entries
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tests a candidate against every entry.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        matches(candidate, &self.entries)
    }
}

/// Returns true if any entry matches `candidate`; false for an empty list.
#[must_use]
pub fn matches(candidate: &str, entries: &[AllowListEntry]) -> bool {
    entries.iter().any(|entry| entry.matches(candidate))
}

/// Returns true if `entry` is written as a pattern literal (`/body/flags`).
#[must_use]
pub fn is_pattern_literal(entry: &str) -> bool {
    split_pattern_literal(entry).is_some()
}

fn split_pattern_literal(entry: &str) -> Option<(&str, &str)> {
    let rest = entry.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let flags = &rest[close + 1..];
    if flags.chars().all(|c| "gimsuy".contains(c)) {
        Some((&rest[..close], flags))
    } else {
        None
    }
}
