//! Rule presets for common configurations.

use crate::{
    FontWeightNotation, MediaFeatureRangeOperatorSpaceAfter, RuleNoSingleLine,
    SelectorPseudoClassWhitelist,
};
use sheetlint_core::{RuleBox, RuleOptions};
use std::str::FromStr;

/// Standard pseudo-classes allowed by the strict preset.
const STANDARD_PSEUDO_CLASSES: &[&str] = &[
    "active",
    "checked",
    "default",
    "disabled",
    "empty",
    "enabled",
    "first-child",
    "first-of-type",
    "focus",
    "focus-visible",
    "focus-within",
    "has",
    "hover",
    "invalid",
    "is",
    "last-child",
    "last-of-type",
    "link",
    "not",
    "only-child",
    "only-of-type",
    "placeholder-shown",
    "required",
    "root",
    "target",
    "valid",
    "visited",
    "where",
    "/^nth-/",
];

/// A rule together with the options a preset runs it with.
pub struct PresetRule {
    /// The rule.
    pub rule: RuleBox,
    /// Options used unless the configuration sets its own.
    pub options: RuleOptions,
}

impl PresetRule {
    fn new(rule: RuleBox, options: RuleOptions) -> Self {
        Self { rule, options }
    }
}

/// Preset configurations for sheetlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Strict rules for maximum consistency.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!(
                "unknown preset \"{other}\" (expected recommended, strict or minimal)"
            )),
        }
    }
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<PresetRule> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `font-weight-notation` (SL001) - numeric weights
/// - `media-feature-range-operator-space-after` (SL003) - one space after operators
#[must_use]
pub fn recommended_rules() -> Vec<PresetRule> {
    vec![
        PresetRule::new(
            Box::new(FontWeightNotation::new()),
            RuleOptions::new("numeric"),
        ),
        PresetRule::new(
            Box::new(MediaFeatureRangeOperatorSpaceAfter::new()),
            RuleOptions::new("always"),
        ),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - `selector-pseudo-class-whitelist` (SL002) - standard pseudo-classes only
/// - `rule-no-single-line` (SL004)
#[must_use]
pub fn strict_rules() -> Vec<PresetRule> {
    let mut rules = recommended_rules();
    rules.push(PresetRule::new(
        Box::new(SelectorPseudoClassWhitelist::new()),
        RuleOptions::new(STANDARD_PSEUDO_CLASSES.to_vec()),
    ));
    rules.push(PresetRule::new(
        Box::new(RuleNoSingleLine::new()),
        RuleOptions::new(true),
    ));
    rules
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `font-weight-notation` accepting keywords wherever they exist
#[must_use]
pub fn minimal_rules() -> Vec<PresetRule> {
    vec![PresetRule::new(
        Box::new(FontWeightNotation::new()),
        RuleOptions::new("named-where-possible"),
    )]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FontWeightNotation::new()),
        Box::new(SelectorPseudoClassWhitelist::new()),
        Box::new(MediaFeatureRangeOperatorSpaceAfter::new()),
        Box::new(RuleNoSingleLine::new()),
    ]
}

/// Finds a rule by name (`font-weight-notation`) or code (`SL001`).
#[must_use]
pub fn rule_by_name(name_or_code: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| {
            rule.name() == name_or_code || rule.code().eq_ignore_ascii_case(name_or_code)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlint_core::{FileContext, Reporter};
    use std::path::Path;

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert!(!Preset::Minimal.rules().is_empty());
        assert_eq!(Preset::Strict.rules().len(), all_rules().len());
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("strict".parse(), Ok(Preset::Strict));
        assert!("lenient".parse::<Preset>().is_err());
    }

    #[test]
    fn preset_options_are_valid() {
        let root = sheetlint_core::ast::parse("").unwrap();
        let ctx = FileContext::new(Path::new("a.css"), &root, Path::new(""));
        for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
            for entry in preset.rules() {
                let mut reporter = Reporter::new(&ctx, entry.rule.as_ref());
                entry.rule.check(&root, &entry.options, &mut reporter);
                assert!(
                    reporter.violations().is_empty(),
                    "{:?} {}: {:?}",
                    preset,
                    entry.rule.name(),
                    reporter.violations()
                );
            }
        }
    }

    #[test]
    fn codes_are_unique_and_resolvable() {
        let rules = all_rules();
        for rule in &rules {
            let by_name = rule_by_name(rule.name()).map(|r| r.code());
            let by_code = rule_by_name(rule.code()).map(|r| r.name());
            assert_eq!(by_name, Some(rule.code()));
            assert_eq!(by_code, Some(rule.name()));
        }
        assert!(rule_by_name("sl003").is_some());
        assert!(rule_by_name("no-such-rule").is_none());
    }
}
