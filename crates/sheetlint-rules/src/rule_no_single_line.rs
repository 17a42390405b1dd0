//! Rule to forbid single-line rule blocks.
//!
//! Takes no options: enable it with `primary = true` or leave `primary` unset.
//!
//! # Detected Patterns
//!
//! - `a { color: red; }`
//! - `@media print { a { color: red; } }` (the inner rule)
//!
//! # Suppression
//!
//! - `/* sheetlint: allow(rule-no-single-line) reason="..." */`

use sheetlint_core::ast::StyleRule;
use sheetlint_core::options::validate_options;
use sheetlint_core::{NodeKind, Reporter, Root, Rule, RuleMessage, RuleOptions, Severity};
use std::fmt;

/// Rule code for rule-no-single-line.
pub const CODE: &str = "SL004";

/// Rule name for rule-no-single-line.
pub const NAME: &str = "rule-no-single-line";

/// Messages reported by this rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The rule fits on one line.
    Rejected,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unexpected single-line rule")
    }
}

impl RuleMessage for Message {
    fn key(&self) -> &'static str {
        "rejected"
    }
}

/// Forbids rules whose selector and block fit on one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleNoSingleLine;

impl RuleNoSingleLine {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the rule's source text has no line break.
    #[must_use]
    pub fn is_single_line(root: &Root, rule: &StyleRule) -> bool {
        !root.slice(rule.span).contains(['\n', '\r'])
    }
}

impl Rule for RuleNoSingleLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids rule blocks written on a single line"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
        if !validate_options(reporter, options, &[], &[]) {
            return;
        }

        root.walk_rules(|rule| {
            if Self::is_single_line(root, rule) {
                reporter.report(&Message::Rejected, NodeKind::Rule, rule.span.start);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check_css;

    fn check(source: &str) -> Vec<sheetlint_core::Violation> {
        check_css(&RuleNoSingleLine::new(), source, &RuleOptions::new(true))
    }

    #[test]
    fn single_line_rule_is_rejected() {
        let violations = check("a { color: red; }");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Unexpected single-line rule");
        assert_eq!(violations[0].location.offset, 0);
    }

    #[test]
    fn multi_line_rule_is_accepted() {
        assert!(check("a {\n  color: red;\n}").is_empty());
        assert!(check("a,\nb { color: red; }").is_empty());
    }

    #[test]
    fn empty_rule_counts_as_single_line() {
        assert_eq!(check("a {}").len(), 1);
    }

    #[test]
    fn nested_rule_points_at_its_own_start() {
        let source = "@media print {\n  a { color: red; }\n}";
        let violations = check(source);
        assert_eq!(violations.len(), 1);
        let location = &violations[0].location;
        assert_eq!((location.line, location.column), (2, 3));
    }

    #[test]
    fn outer_rule_spanning_lines_is_accepted_but_inner_is_not() {
        let violations = check("a {\n  & b { color: red; }\n}");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn takes_no_option_value() {
        let rule = RuleNoSingleLine::new();
        let violations = check_css(&rule, "a {}", &RuleOptions::new("always"));
        assert_eq!(
            violations[0].message,
            "Unexpected option value \"always\" for rule \"rule-no-single-line\""
        );

        let violations = check_css(&rule, "a {}", &RuleOptions::default());
        assert_eq!(violations[0].message_key, "rejected");
    }
}
