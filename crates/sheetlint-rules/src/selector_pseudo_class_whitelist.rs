//! Rule to restrict pseudo-classes to an allowed list.
//!
//! # Options
//!
//! - primary: a pseudo-class name or `/pattern/`, or a list of them, matched
//!   against the name without its colon and vendor prefix
//!
//! Pseudo-elements (`::before`) are never checked. Pseudo-classes nested in
//! `:not(...)`, `:is(...)` and similar are. A selector that cannot be parsed
//! is reported once, as a warning on its rule.
//!
//! # Suppression
//!
//! - `/* sheetlint: allow(selector-pseudo-class-whitelist) reason="..." */`

use sheetlint_core::ast::selector::{self, Component};
use sheetlint_core::options::{is_string_or_pattern, validate_options, Accept};
use sheetlint_core::utils::{is_standard_syntax_rule, vendor_unprefixed, AllowList};
use sheetlint_core::{NodeKind, Reporter, Root, Rule, RuleMessage, RuleOptions};
use std::fmt;
use tracing::{debug, warn};

/// Rule code for selector-pseudo-class-whitelist.
pub const CODE: &str = "SL002";

/// Rule name for selector-pseudo-class-whitelist.
pub const NAME: &str = "selector-pseudo-class-whitelist";

const ENTRY: &[Accept] = &[Accept::Satisfies(is_string_or_pattern)];

const PRIMARY: &[Accept] = &[
    Accept::Satisfies(is_string_or_pattern),
    Accept::ListOf(ENTRY),
];

/// Messages reported by this rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The pseudo-class is not allowed.
    Rejected(String),
    /// The selector could not be parsed; its pseudo-classes were not checked.
    Unparsable,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(name) => write!(f, "Unexpected pseudo-class \"{name}\""),
            Self::Unparsable => f.write_str("Cannot parse selector"),
        }
    }
}

impl RuleMessage for Message {
    fn key(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Unparsable => "parse-error",
        }
    }
}

/// Allows only listed pseudo-classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorPseudoClassWhitelist;

impl SelectorPseudoClassWhitelist {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classifies one pseudo node, returning the message to report if it is not allowed.
    ///
    /// Returns `None` for pseudo-elements and allowed pseudo-classes.
    #[must_use]
    pub fn classify(pseudo: &Component, allowed: &AllowList) -> Option<Message> {
        if pseudo.value.starts_with("::") {
            return None;
        }
        let name = pseudo.value.strip_prefix(':').unwrap_or(&pseudo.value);
        if allowed.matches(vendor_unprefixed(name)) {
            None
        } else {
            Some(Message::Rejected(name.to_string()))
        }
    }
}

impl Rule for SelectorPseudoClassWhitelist {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Allows only the listed pseudo-class selectors"
    }

    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
        if !validate_options(reporter, options, PRIMARY, &[]) {
            return;
        }
        let allowed = match options.primary.as_ref().map(AllowList::from_value) {
            Some(Ok(list)) => list,
            Some(Err(e)) => {
                warn!(rule = NAME, "{e}");
                return;
            }
            None => return,
        };

        root.walk_rules(|rule| {
            if !is_standard_syntax_rule(rule) || !rule.selector.contains(':') {
                return;
            }
            let selectors = match selector::parse(&rule.selector) {
                Ok(selectors) => selectors,
                Err(e) => {
                    debug!(rule = NAME, selector = %rule.selector, "cannot parse selector: {e}");
                    reporter.warn(&Message::Unparsable, NodeKind::Rule, rule.selector_offset);
                    return;
                }
            };

            selectors.walk_pseudos(|pseudo| {
                if let Some(message) = Self::classify(pseudo, &allowed) {
                    reporter.report(
                        &message,
                        NodeKind::Rule,
                        rule.selector_map.source_offset(pseudo.source_index),
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check_css;

    fn allow(entries: &[&str]) -> RuleOptions {
        RuleOptions::new(entries.to_vec())
    }

    fn check(source: &str, options: &RuleOptions) -> Vec<sheetlint_core::Violation> {
        check_css(&SelectorPseudoClassWhitelist::new(), source, options)
    }

    #[test]
    fn pseudo_elements_are_skipped() {
        assert!(check("a:hover::before {}", &allow(&["hover"])).is_empty());
    }

    #[test]
    fn unlisted_pseudo_class_is_rejected() {
        let violations = check("a:hover, a:focus {}", &allow(&["hover"]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Unexpected pseudo-class \"focus\"");
        assert_eq!(violations[0].location.offset, 10);
        assert_eq!(violations[0].node, Some(NodeKind::Rule));
    }

    #[test]
    fn single_string_option_is_a_one_element_list() {
        assert!(check("a:hover {}", &RuleOptions::new("hover")).is_empty());
    }

    #[test]
    fn vendor_prefix_is_ignored_for_matching_but_reported() {
        assert!(check("input:-moz-placeholder {}", &allow(&["placeholder"])).is_empty());

        let violations = check("input:-webkit-autofill {}", &allow(&["hover"]));
        assert_eq!(
            violations[0].message,
            "Unexpected pseudo-class \"-webkit-autofill\""
        );
    }

    #[test]
    fn patterns_match_anywhere() {
        let source = "li:nth-child(2n), li:nth-last-of-type(1) {}";
        assert!(check(source, &allow(&["/^nth-/"])).is_empty());
        assert_eq!(check("li:first-child {}", &allow(&["/^nth-/"])).len(), 1);
    }

    #[test]
    fn nested_pseudos_are_checked() {
        let source = "\n  a:not(:focus) { color: red; }";
        let violations = check(source, &allow(&["not"]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.offset, source.find(":focus").unwrap());
        let location = &violations[0].location;
        assert_eq!((location.line, location.column), (2, 9));
    }

    #[test]
    fn comments_in_selectors_are_ignored() {
        let source = "a/* note */:focus { color: red; }";
        let violations = check(source, &allow(&["hover"]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Unexpected pseudo-class \"focus\"");
        assert_eq!(violations[0].location.offset, 11);

        assert!(check("a:hover/* :focus */ {}", &allow(&["hover"])).is_empty());
    }

    #[test]
    fn unparsable_selector_is_a_warning_on_the_rule() {
        let source = "b {}\n  a:hover,, p { color: red; }";
        let violations = check(source, &allow(&["focus"]));
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.message, "Cannot parse selector");
        assert_eq!(v.message_key, "parse-error");
        assert_eq!(v.severity, sheetlint_core::Severity::Warning);
        assert_eq!(v.node, Some(NodeKind::Rule));
        assert_eq!((v.location.line, v.location.column), (2, 3));
    }

    #[test]
    fn repeated_checks_agree() {
        let source = "a:hover, a:focus, li:nth-child(2) {}";
        let options = allow(&["hover"]);
        let first = check(source, &options);
        assert_eq!(first.len(), 2);
        assert_eq!(first, check(source, &options));
    }

    #[test]
    fn non_standard_rules_are_skipped() {
        assert!(check("#{$sel}:hover {}", &allow(&["focus"])).is_empty());
    }

    #[test]
    fn bad_pattern_is_an_invalid_option() {
        let violations = check("a:hover {}", &allow(&["/(/"]));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Invalid option value \"/(/\" for rule \"selector-pseudo-class-whitelist\""
        );
    }

    #[test]
    fn missing_option_is_reported() {
        let violations = check("a:hover {}", &RuleOptions::default());
        assert_eq!(
            violations[0].message,
            "Expected option value for rule \"selector-pseudo-class-whitelist\""
        );
    }
}
