//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! /* sheetlint: allow(font-weight-notation) reason="matches the brand font file" */
//! ```
//!
//! Only comment nodes count: text that looks like a directive inside a
//! string, or inside a selector or value, is not one. A directive covers the
//! line its comment ends on and the line after it. `allow(all)` covers every
//! rule.

use crate::ast::{LineIndex, Root};
use std::collections::{BTreeMap, HashSet};

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// One parsed `sheetlint: allow(...)` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule names listed in the directive.
    pub rules: HashSet<String>,
    /// The `reason="..."` text, if given.
    pub reason: Option<String>,
}

impl AllowDirective {
    /// Parses the body of a comment (without `/*` and `*/`).
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let directive = body.trim().strip_prefix("sheetlint:")?.trim_start();
        let allow_content = directive.strip_prefix("allow(")?;

        let (list, rest) = allow_content.split_once(')')?;
        let rules: HashSet<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if rules.is_empty() {
            return None;
        }

        let reason = rest
            .trim()
            .strip_prefix("reason=")
            .and_then(|r| r.trim_start().strip_prefix('"'))
            .and_then(|r| r.split_once('"'))
            .map(|(reason, _)| reason.to_string());

        Some(Self { rules, reason })
    }

    fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Every allow directive of one stylesheet, indexed by the line its comment ends on.
#[derive(Debug, Clone, Default)]
pub struct AllowDirectives {
    by_line: BTreeMap<usize, Vec<AllowDirective>>,
}

impl AllowDirectives {
    /// Collects the directives from every comment node of `sheet`.
    #[must_use]
    pub fn collect(sheet: &Root, index: &LineIndex) -> Self {
        let mut by_line: BTreeMap<usize, Vec<AllowDirective>> = BTreeMap::new();
        sheet.walk_comments(|comment| {
            if let Some(directive) = AllowDirective::parse(&comment.text) {
                let last = comment.span.end.saturating_sub(1);
                let (line, _) = index.line_col(sheet.source(), last);
                by_line.entry(line).or_default().push(directive);
            }
        });
        Self { by_line }
    }

    /// Returns true if the stylesheet has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Checks whether `rule_name` is allowed on `line` (1-indexed).
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str) -> AllowCheck {
        [line.saturating_sub(1), line]
            .into_iter()
            .filter(|&l| l > 0)
            .filter_map(|l| self.by_line.get(&l))
            .flatten()
            .find(|directive| directive.covers(rule_name))
            .map_or(AllowCheck::Denied, |directive| AllowCheck::Allowed {
                reason: directive.reason.clone(),
            })
    }
}
