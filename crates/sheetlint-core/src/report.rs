//! Diagnostic reporting for a single rule invocation.

use crate::ast::NodeKind;
use crate::context::FileContext;
use crate::rule::Rule;
use crate::types::{Location, RuleMessage, Severity, Suggestion, Violation, ViolationKind};
use std::fmt;

/// Collects the violations one rule produces on one stylesheet.
///
/// Every violation is located at an absolute offset into the file; line and
/// column are derived here so rules only deal in offsets.
pub struct Reporter<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'static str,
    code: &'static str,
    severity: Severity,
    requires_allow_reason: bool,
    violations: Vec<Violation>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter for `rule` running over the file in `ctx`.
    #[must_use]
    pub fn new(ctx: &'a FileContext<'a>, rule: &dyn Rule) -> Self {
        Self {
            ctx,
            rule: rule.name(),
            code: rule.code(),
            severity: rule.default_severity(),
            requires_allow_reason: rule.requires_allow_reason(),
            violations: Vec::new(),
        }
    }

    /// Reports at `severity` instead of the rule's default.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the name of the rule being reported for.
    #[must_use]
    pub fn rule_name(&self) -> &'static str {
        self.rule
    }

    /// Reports a policy violation at an absolute source offset.
    ///
    /// Suppressed when an allow directive covers the offset's line.
    pub fn report(&mut self, message: &dyn RuleMessage, node: NodeKind, offset: usize) {
        self.push(message, node, offset, self.severity);
    }

    /// Reports at warning severity whatever the rule's configured severity.
    ///
    /// Used for nodes a rule could not read, such as an unparsable selector.
    pub fn warn(&mut self, message: &dyn RuleMessage, node: NodeKind, offset: usize) {
        self.push(message, node, offset, Severity::Warning);
    }

    fn push(
        &mut self,
        message: &dyn RuleMessage,
        node: NodeKind,
        offset: usize,
        severity: Severity,
    ) {
        let location = Location::from_offset(
            self.ctx.relative_path.clone(),
            &self.ctx.line_index,
            self.ctx.content,
            offset,
        );

        let allow = self.ctx.allows.check(location.line, self.rule);
        if allow.is_allowed() {
            if self.requires_allow_reason && allow.reason().is_none() {
                let warning = MissingAllowReason { rule: self.rule };
                self.violations.push(
                    Violation::new(self.code, self.rule, Severity::Warning, location, &warning)
                        .with_node(node)
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this exception is necessary",
                        )),
                );
            }
            return;
        }

        self.violations.push(
            Violation::new(self.code, self.rule, severity, location, message).with_node(node),
        );
    }

    /// Reports a configuration problem. These are not tied to any node.
    pub fn report_invalid_option(&mut self, message: &dyn RuleMessage) {
        let location = Location::new(self.ctx.relative_path.clone(), 1, 1);
        self.violations.push(
            Violation::new(self.code, self.rule, self.severity, location, message)
                .with_kind(ViolationKind::InvalidOption),
        );
    }

    /// Returns the violations reported so far.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the reporter, returning its violations in report order.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

struct MissingAllowReason {
    rule: &'static str,
}

impl fmt::Display for MissingAllowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allow directive for '{}' is missing required reason",
            self.rule
        )
    }
}

impl RuleMessage for MissingAllowReason {
    fn key(&self) -> &'static str {
        "missing-allow-reason"
    }
}
