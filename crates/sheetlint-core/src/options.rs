//! Rule option validation.
//!
//! Each rule declares what its primary option and secondary options may be.
//! [`validate_options`] runs once per rule invocation, before any traversal,
//! and reports every mismatch as an invalid-option violation.
//!
//! ```text
//! [rules.font-weight-notation]
//! primary = "named-where-possible"        # primary option
//! ignore-values = ["/^var/", "lighter"]   # secondary options
//! ```

use crate::report::Reporter;
use crate::types::RuleMessage;
use crate::utils::matcher::{is_pattern_literal, AllowListEntry};
use std::fmt;

/// A predicate over an option value.
pub type Predicate = fn(&toml::Value) -> bool;

/// One accepted form of an option value. A list of these is OR-combined.
#[derive(Debug, Clone, Copy)]
pub enum Accept {
    /// Exactly this string.
    Value(&'static str),
    /// Anything the predicate accepts.
    Satisfies(Predicate),
    /// An array whose elements each take one of these forms.
    ListOf(&'static [Accept]),
}

/// Declared secondary options: key → accepted forms.
pub type SecondarySpec = &'static [(&'static str, &'static [Accept])];

/// Options for one rule invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOptions {
    /// The primary option, if configured.
    pub primary: Option<toml::Value>,
    /// Secondary options, if configured.
    pub secondary: Option<toml::Table>,
}

impl RuleOptions {
    /// Creates options with a primary value.
    #[must_use]
    pub fn new(primary: impl Into<toml::Value>) -> Self {
        Self {
            primary: Some(primary.into()),
            secondary: None,
        }
    }

    /// Adds a secondary option.
    #[must_use]
    pub fn with_secondary(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.secondary
            .get_or_insert_with(toml::Table::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// Layers these options over `base`.
    ///
    /// A set primary replaces the base primary. Each secondary key replaces
    /// the same key of `base`; other base keys are kept.
    #[must_use]
    pub fn layered_over(self, base: RuleOptions) -> Self {
        let secondary = match (base.secondary, self.secondary) {
            (Some(mut table), Some(top)) => {
                for (key, value) in top {
                    table.insert(key, value);
                }
                Some(table)
            }
            (base, top) => top.or(base),
        };
        Self {
            primary: self.primary.or(base.primary),
            secondary,
        }
    }

    /// Returns true if neither a primary nor any secondary option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.as_ref().map_or(true, toml::Table::is_empty)
    }

    /// Returns the primary option as a string.
    #[must_use]
    pub fn primary_str(&self) -> Option<&str> {
        self.primary.as_ref().and_then(toml::Value::as_str)
    }

    /// Returns a secondary option by key.
    #[must_use]
    pub fn secondary(&self, key: &str) -> Option<&toml::Value> {
        self.secondary.as_ref().and_then(|table| table.get(key))
    }
}

/// Configuration problems found by [`validate_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionMessage {
    /// A required primary option is missing.
    Expected {
        /// Rule name.
        rule: String,
    },
    /// The rule takes no option but one was given.
    Unexpected {
        /// Offending value.
        value: String,
        /// Rule name.
        rule: String,
    },
    /// The primary option has an unaccepted value.
    InvalidValue {
        /// Offending value.
        value: String,
        /// Rule name.
        rule: String,
    },
    /// A secondary option has an unaccepted value.
    InvalidSecondaryValue {
        /// Offending value.
        value: String,
        /// Secondary option name.
        option: String,
        /// Rule name.
        rule: String,
    },
    /// A secondary option name is not known to the rule.
    InvalidName {
        /// Secondary option name.
        option: String,
        /// Rule name.
        rule: String,
    },
}

impl fmt::Display for OptionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { rule } => write!(f, "Expected option value for rule \"{rule}\""),
            Self::Unexpected { value, rule } => {
                write!(f, "Unexpected option value \"{value}\" for rule \"{rule}\"")
            }
            Self::InvalidValue { value, rule } => {
                write!(f, "Invalid option value \"{value}\" for rule \"{rule}\"")
            }
            Self::InvalidSecondaryValue {
                value,
                option,
                rule,
            } => write!(
                f,
                "Invalid value \"{value}\" for option \"{option}\" of rule \"{rule}\""
            ),
            Self::InvalidName { option, rule } => {
                write!(f, "Invalid option name \"{option}\" for rule \"{rule}\"")
            }
        }
    }
}

impl RuleMessage for OptionMessage {
    fn key(&self) -> &'static str {
        match self {
            Self::Expected { .. } => "expected-option",
            Self::Unexpected { .. } => "unexpected-option",
            Self::InvalidValue { .. } => "invalid-option-value",
            Self::InvalidSecondaryValue { .. } => "invalid-secondary-value",
            Self::InvalidName { .. } => "invalid-option-name",
        }
    }
}

/// Validates a rule's options, reporting every problem found.
///
/// `primary` lists the accepted forms of the primary option; an empty slice
/// means the rule takes no option (only `true` or nothing is accepted).
/// An array value is only accepted where an [`Accept::ListOf`] form is
/// declared, and is then validated element by element. `secondary` declares
/// the known secondary keys; any other key is rejected.
///
/// Returns false if anything was reported; the caller must then skip traversal.
pub fn validate_options(
    reporter: &mut Reporter<'_>,
    options: &RuleOptions,
    primary: &[Accept],
    secondary: SecondarySpec,
) -> bool {
    let rule = reporter.rule_name().to_string();
    let mut problems = Vec::new();

    match &options.primary {
        None if primary.is_empty() => {}
        None => problems.push(OptionMessage::Expected { rule: rule.clone() }),
        Some(toml::Value::Boolean(true)) if primary.is_empty() => {}
        Some(value) if primary.is_empty() => problems.push(OptionMessage::Unexpected {
            value: display_value(value),
            rule: rule.clone(),
        }),
        Some(value) => {
            for item in rejected(primary, value) {
                problems.push(OptionMessage::InvalidValue {
                    value: display_value(item),
                    rule: rule.clone(),
                });
            }
        }
    }

    if let Some(table) = &options.secondary {
        for (key, value) in table {
            let Some((_, accepted)) = secondary.iter().find(|(name, _)| name == key) else {
                problems.push(OptionMessage::InvalidName {
                    option: key.clone(),
                    rule: rule.clone(),
                });
                continue;
            };
            for item in rejected(accepted, value) {
                problems.push(OptionMessage::InvalidSecondaryValue {
                    value: display_value(item),
                    option: key.clone(),
                    rule: rule.clone(),
                });
            }
        }
    }

    for problem in &problems {
        tracing::debug!(rule = %rule, "{problem}");
        reporter.report_invalid_option(problem);
    }
    problems.is_empty()
}

/// Returns the parts of `value` that no accepted form covers.
fn rejected<'v>(accepted: &[Accept], value: &'v toml::Value) -> Vec<&'v toml::Value> {
    if let toml::Value::Array(items) = value {
        let element_forms = accepted.iter().find_map(|accept| match accept {
            Accept::ListOf(forms) => Some(*forms),
            _ => None,
        });
        if let Some(forms) = element_forms {
            return items.iter().filter(|item| !is_accepted(forms, item)).collect();
        }
    }
    if is_accepted(accepted, value) {
        Vec::new()
    } else {
        vec![value]
    }
}

fn is_accepted(accepted: &[Accept], value: &toml::Value) -> bool {
    accepted.iter().any(|accept| match accept {
        Accept::Value(expected) => value.as_str() == Some(*expected),
        Accept::Satisfies(predicate) => predicate(value),
        Accept::ListOf(_) => false,
    })
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Accepts any string.
#[must_use]
pub fn is_string(value: &toml::Value) -> bool {
    value.is_str()
}

/// Accepts a plain string, or a `/pattern/` string whose body compiles.
#[must_use]
pub fn is_string_or_pattern(value: &toml::Value) -> bool {
    match value.as_str() {
        Some(s) if is_pattern_literal(s) => AllowListEntry::parse(s).is_ok(),
        Some(_) => true,
        None => false,
    }
}

/// Accepts `true` or `false`.
#[must_use]
pub fn is_bool(value: &toml::Value) -> bool {
    value.is_bool()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Root;
    use crate::context::FileContext;
    use crate::rule::Rule;
    use crate::types::{Violation, ViolationKind};
    use std::path::Path;

    struct SampleRule;

    impl Rule for SampleRule {
        fn name(&self) -> &'static str {
            "sample-rule"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn check(&self, _root: &Root, _options: &RuleOptions, _reporter: &mut Reporter<'_>) {}
    }

    const MODES: &[Accept] = &[Accept::Value("always"), Accept::Value("never")];
    const PATTERN: &[Accept] = &[Accept::Satisfies(is_string_or_pattern)];
    const PATTERNS: &[Accept] = &[
        Accept::Satisfies(is_string_or_pattern),
        Accept::ListOf(PATTERN),
    ];
    const IGNORE: SecondarySpec = &[("ignore-values", PATTERNS)];

    fn run(
        options: &RuleOptions,
        primary: &[Accept],
        secondary: SecondarySpec,
    ) -> (bool, Vec<Violation>) {
        let sheet = Root::default();
        let ctx = FileContext::new(Path::new("a.css"), &sheet, Path::new(""));
        let mut reporter = Reporter::new(&ctx, &SampleRule);
        let valid = validate_options(&mut reporter, options, primary, secondary);
        (valid, reporter.into_violations())
    }

    fn messages(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn accepts_enumerated_value() {
        let (valid, violations) = run(&RuleOptions::new("always"), MODES, &[]);
        assert!(valid);
        assert!(violations.is_empty());
    }

    #[test]
    fn rejects_unknown_value() {
        let (valid, violations) = run(&RuleOptions::new("sometimes"), MODES, &[]);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec!["Invalid option value \"sometimes\" for rule \"sample-rule\""]
        );
        assert_eq!(violations[0].kind, ViolationKind::InvalidOption);
    }

    #[test]
    fn missing_primary_is_reported() {
        let (valid, violations) = run(&RuleOptions::default(), MODES, &[]);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec!["Expected option value for rule \"sample-rule\""]
        );
    }

    #[test]
    fn rule_without_options_accepts_true_or_nothing() {
        assert!(run(&RuleOptions::default(), &[], &[]).0);
        assert!(run(&RuleOptions::new(true), &[], &[]).0);

        let (valid, violations) = run(&RuleOptions::new("always"), &[], &[]);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec!["Unexpected option value \"always\" for rule \"sample-rule\""]
        );
    }

    #[test]
    fn array_primary_is_validated_per_element() {
        let list = toml::Value::Array(vec![
            "hover".into(),
            toml::Value::Integer(3),
            "/^focus/".into(),
        ]);
        let (valid, violations) = run(&RuleOptions::new(list), PATTERNS, &[]);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec!["Invalid option value \"3\" for rule \"sample-rule\""]
        );
    }

    #[test]
    fn array_is_rejected_where_no_list_is_declared() {
        let (valid, violations) = run(&RuleOptions::new(vec!["always"]), MODES, &[]);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec!["Invalid option value \"[\"always\"]\" for rule \"sample-rule\""]
        );

        let options = RuleOptions::new("always").with_secondary("ignore-values", vec!["x"]);
        let (valid, violations) = run(&options, MODES, &[("ignore-values", PATTERN)]);
        assert!(!valid);
        assert_eq!(violations[0].message_key, "invalid-secondary-value");
    }

    #[test]
    fn secondary_options_are_checked_by_key() {
        let options = RuleOptions::new("always")
            .with_secondary("ignore-values", vec!["bolder", "/(/"])
            .with_secondary("ignore", "x");
        let (valid, violations) = run(&options, MODES, IGNORE);
        assert!(!valid);
        assert_eq!(
            messages(&violations),
            vec![
                "Invalid option name \"ignore\" for rule \"sample-rule\"",
                "Invalid value \"/(/\" for option \"ignore-values\" of rule \"sample-rule\"",
            ]
        );
    }

    #[test]
    fn valid_secondary_options_pass() {
        let options = RuleOptions::new("never").with_secondary("ignore-values", "/^light/i");
        assert!(run(&options, MODES, IGNORE).0);
    }

    #[test]
    fn layering_keeps_unset_fields() {
        let base = RuleOptions::new("numeric")
            .with_secondary("ignore-values", "lighter")
            .with_secondary("mode", "loose");
        let top = RuleOptions::default().with_secondary("ignore-values", vec!["bolder"]);

        let merged = top.layered_over(base.clone());
        assert_eq!(merged.primary_str(), Some("numeric"));
        assert_eq!(
            merged.secondary("ignore-values"),
            Some(&toml::Value::Array(vec!["bolder".into()]))
        );
        assert_eq!(merged.secondary("mode").and_then(toml::Value::as_str), Some("loose"));

        let merged = RuleOptions::new("named-where-possible").layered_over(base);
        assert_eq!(merged.primary_str(), Some("named-where-possible"));
        assert!(merged.secondary("mode").is_some());
    }

    #[test]
    fn options_emptiness() {
        assert!(RuleOptions::default().is_empty());
        assert!(!RuleOptions::new(true).is_empty());
        assert_eq!(RuleOptions::new("x").primary_str(), Some("x"));
    }
}
