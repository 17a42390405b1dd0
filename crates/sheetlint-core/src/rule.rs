//! Rule trait for defining lint rules.

use crate::ast::Root;
use crate::options::RuleOptions;
use crate::report::Reporter;
use crate::types::Severity;

/// A per-file lint rule over a parsed stylesheet.
///
/// Implement this trait to create rules that check individual stylesheets.
/// A rule validates its options first, then walks the tree and reports
/// offending tokens through the [`Reporter`].
///
/// # Example
///
/// ```ignore
/// use sheetlint_core::{Reporter, Root, Rule, RuleOptions};
/// use sheetlint_core::options::validate_options;
///
/// pub struct NoImportant;
///
/// impl Rule for NoImportant {
///     fn name(&self) -> &'static str { "declaration-no-important" }
///     fn code(&self) -> &'static str { "SL900" }
///
///     fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
///         if !validate_options(reporter, options, &[], &[]) {
///             return;
///         }
///         root.walk_decls(|decl, _| {
///             if decl.important {
///                 reporter.report(&Message::Rejected, NodeKind::Declaration, decl.span.start);
///             }
///         });
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "font-weight-notation").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks one stylesheet, reporting every violation found.
    ///
    /// Invalid `options` are reported as configuration violations and the
    /// tree is not walked.
    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
