//! Rule to require or forbid a space after media feature range operators.
//!
//! # Options
//!
//! - primary: `"always"` or `"never"`
//!
//! # Detected Patterns
//!
//! - `@media (width>=600px)` under `"always"`
//! - `@media (width >= 600px)` under `"never"`
//!
//! # Suppression
//!
//! - `/* sheetlint: allow(media-feature-range-operator-space-after) reason="..." */`

use crate::whitespace::{check_after, SpaceExpectation, SpaceViolation};
use sheetlint_core::ast::AtRule;
use sheetlint_core::options::{validate_options, Accept};
use sheetlint_core::{NodeKind, Reporter, Root, Rule, RuleMessage, RuleOptions};
use std::fmt;

/// Rule code for media-feature-range-operator-space-after.
pub const CODE: &str = "SL003";

/// Rule name for media-feature-range-operator-space-after.
pub const NAME: &str = "media-feature-range-operator-space-after";

const PRIMARY: &[Accept] = &[Accept::Value("always"), Accept::Value("never")];

/// Messages reported by this rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A single space was required after the operator.
    ExpectedAfter,
    /// Whitespace after the operator is forbidden.
    RejectedAfter,
}

impl From<SpaceViolation> for Message {
    fn from(violation: SpaceViolation) -> Self {
        match violation {
            SpaceViolation::ExpectedAfter => Self::ExpectedAfter,
            SpaceViolation::RejectedAfter => Self::RejectedAfter,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedAfter => f.write_str("Expected single space after range operator"),
            Self::RejectedAfter => f.write_str("Unexpected whitespace after range operator"),
        }
    }
}

impl RuleMessage for Message {
    fn key(&self) -> &'static str {
        match self {
            Self::ExpectedAfter => "expected-after",
            Self::RejectedAfter => "rejected-after",
        }
    }
}

/// One range operator found in media query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOperator<'a> {
    /// `>=`, `<=`, `>`, `<` or `=`.
    pub text: &'a str,
    /// Offset of the first operator character.
    pub start: usize,
    /// Offset just past the operator.
    pub end: usize,
}

/// Iterator over the range operators of a parameter string, left to right.
///
/// An operator must be preceded by a character other than `>` or `<`, so the
/// `=` of `>=` never matches on its own. Matches do not overlap.
#[derive(Debug, Clone)]
pub struct RangeOperators<'a> {
    params: &'a str,
    pos: usize,
}

impl<'a> RangeOperators<'a> {
    /// Creates an iterator over `params`.
    #[must_use]
    pub fn new(params: &'a str) -> Self {
        Self { params, pos: 0 }
    }
}

impl<'a> Iterator for RangeOperators<'a> {
    type Item = RangeOperator<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.params.as_bytes();
        // The preceding character is consumed by a match, so it must lie at or after `pos`.
        let mut i = self.pos + 1;
        while i < bytes.len() {
            let operator = bytes[i];
            let preceding = bytes[i - 1];
            if matches!(operator, b'>' | b'<' | b'=') && !matches!(preceding, b'>' | b'<') {
                let len = if operator != b'=' && bytes.get(i + 1) == Some(&b'=') {
                    2
                } else {
                    1
                };
                self.pos = i + len;
                return Some(RangeOperator {
                    text: &self.params[i..i + len],
                    start: i,
                    end: i + len,
                });
            }
            i += 1;
        }
        self.pos = bytes.len();
        None
    }
}

/// Requires or forbids a space after range operators in `@media` queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFeatureRangeOperatorSpaceAfter;

impl MediaFeatureRangeOperatorSpaceAfter {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the range operators of a `@media` at-rule; other at-rules have none.
    #[must_use]
    pub fn operators(at_rule: &AtRule) -> Option<RangeOperators<'_>> {
        (at_rule.name == "media").then(|| RangeOperators::new(&at_rule.params))
    }
}

impl Rule for MediaFeatureRangeOperatorSpaceAfter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a single space or no space after media feature range operators"
    }

    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
        if !validate_options(reporter, options, PRIMARY, &[]) {
            return;
        }
        let Some(expectation) = options
            .primary_str()
            .and_then(|p| p.parse::<SpaceExpectation>().ok())
        else {
            return;
        };

        root.walk_at_rules(|at_rule| {
            let Some(operators) = Self::operators(at_rule) else {
                return;
            };
            for operator in operators {
                if let Some(violation) = check_after(&at_rule.params, operator.end, expectation) {
                    reporter.report(
                        &Message::from(violation),
                        NodeKind::AtRule,
                        at_rule.params_map.source_offset(operator.end),
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check_css;

    fn operators(params: &str) -> Vec<(&str, usize, usize)> {
        RangeOperators::new(params)
            .map(|op| (op.text, op.start, op.end))
            .collect()
    }

    fn check(source: &str, expectation: &str) -> Vec<sheetlint_core::Violation> {
        check_css(
            &MediaFeatureRangeOperatorSpaceAfter::new(),
            source,
            &RuleOptions::new(expectation),
        )
    }

    #[test]
    fn finds_every_operator_once() {
        assert_eq!(
            operators("(100px<=width<600px)"),
            vec![("<=", 6, 8), ("<", 13, 14)]
        );
        assert_eq!(operators("(width>=100px)"), vec![(">=", 6, 8)]);
        assert_eq!(operators("(width = 100px)"), vec![("=", 7, 8)]);
        assert_eq!(operators("(a>>b)"), vec![(">", 2, 3)]);
    }

    #[test]
    fn operator_at_start_has_no_preceding_character() {
        assert!(operators(">=100px").is_empty());
        assert!(operators("").is_empty());
    }

    #[test]
    fn iterator_is_restartable() {
        let first: Vec<_> = RangeOperators::new("(a<b) and (c>d)").collect();
        let second: Vec<_> = RangeOperators::new("(a<b) and (c>d)").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn always_reports_missing_space_after_operator() {
        let source = "@media (width>=100px) {}";
        let violations = check(source, "always");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Expected single space after range operator"
        );
        assert_eq!(violations[0].location.offset, source.find("100px").unwrap());
    }

    #[test]
    fn always_accepts_single_space() {
        assert!(check("@media (width >= 100px) {}", "always").is_empty());
    }

    #[test]
    fn always_rejects_double_space_and_newline() {
        assert_eq!(check("@media (width >=  100px) {}", "always").len(), 1);
        assert_eq!(check("@media (width >=\n100px) {}", "always").len(), 1);
    }

    #[test]
    fn never_rejects_whitespace() {
        let violations = check("@media (400px <= width <= 700px) {}", "never");
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.message_key == "rejected-after"));
        assert!(check("@media (400px<=width<=700px) {}", "never").is_empty());
    }

    #[test]
    fn only_media_at_rules_are_checked() {
        assert!(check("@supports (width>=1px) {}", "always").is_empty());
        assert!(check("@MEDIA (width>=1px) {}", "always").is_empty());
    }

    #[test]
    fn nested_media_is_checked() {
        let violations = check("@layer base {\n  @media (width>1px) {}\n}", "always");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn rejects_unknown_expectation() {
        let violations = check("@media (width>=1px) {}", "sometimes");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message_key, "invalid-option-value");
    }
}
