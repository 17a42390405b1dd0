//! # sheetlint-rules
//!
//! Built-in lint rules for sheetlint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `font-weight-notation` | Requires numeric or named (where possible) font weights |
//! | SL002 | `selector-pseudo-class-whitelist` | Allows only listed pseudo-classes |
//! | SL003 | `media-feature-range-operator-space-after` | Space (or none) after `>=`, `<`, `=` in media queries |
//! | SL004 | `rule-no-single-line` | Forbids single-line rule blocks |
//!
//! ## Usage
//!
//! ```ignore
//! use sheetlint_core::{Analyzer, RuleOptions};
//! use sheetlint_rules::{FontWeightNotation, RuleNoSingleLine};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./styles")
//!     .rule_with_options(FontWeightNotation::new(), RuleOptions::new("numeric"))
//!     .rule(RuleNoSingleLine::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod font_weight_notation;
pub mod media_feature_range_operator_space_after;
mod presets;
pub mod rule_no_single_line;
pub mod selector_pseudo_class_whitelist;
pub mod whitespace;

pub use font_weight_notation::FontWeightNotation;
pub use media_feature_range_operator_space_after::MediaFeatureRangeOperatorSpaceAfter;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, strict_rules, Preset, PresetRule,
};
pub use rule_no_single_line::RuleNoSingleLine;
pub use selector_pseudo_class_whitelist::SelectorPseudoClassWhitelist;

/// Re-export core types for convenience.
pub use sheetlint_core::{Rule, RuleOptions, Severity, Violation};

#[cfg(test)]
pub(crate) mod testing {
    use sheetlint_core::{FileContext, Reporter, Rule, RuleOptions, Violation};
    use std::path::Path;

    /// Runs one rule over `source` and returns its violations in report order.
    pub fn check_css(rule: &dyn Rule, source: &str, options: &RuleOptions) -> Vec<Violation> {
        let root = sheetlint_core::ast::parse(source).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("test.css"), &root, Path::new(""));
        let mut reporter = Reporter::new(&ctx, rule);
        rule.check(&root, options, &mut reporter);
        reporter.into_violations()
    }
}
