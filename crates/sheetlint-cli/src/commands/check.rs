//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use sheetlint_core::{Analyzer, Config, RuleOptions, Severity};
use sheetlint_rules::{rule_by_name, Preset, PresetRule};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line settings for a check run.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Preset overriding the configured one.
    pub preset: Option<String>,
    /// Comma-separated rule filter.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Failure threshold overriding the configured one.
    pub fail_on: Option<Severity>,
}

/// Runs the check command.
///
/// Returns `true` when a violation reached the failure threshold.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let preset_name = options
        .preset
        .as_deref()
        .or(config.preset.as_deref())
        .unwrap_or("recommended")
        .to_owned();
    let preset: Preset = preset_name.parse().map_err(|e: String| anyhow!(e))?;
    let threshold = options.fail_on.or(config.fail_on).unwrap_or(Severity::Error);

    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(preset, &names)
        }
        None => preset_with_configured(preset, &config),
    };

    let mut builder = Analyzer::builder().root(path).config(config);
    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for entry in rules {
        builder = builder.rule_box_with_options(entry.rule, entry.options);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules (preset {})",
        path,
        analyzer.rule_count(),
        preset_name
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(result.has_violations_at(threshold))
}

/// The preset's rules plus any rule the configuration names that the preset lacks.
fn preset_with_configured(preset: Preset, config: &Config) -> Vec<PresetRule> {
    let mut rules = preset.rules();

    let mut configured: Vec<&String> = config.rules.keys().collect();
    configured.sort();
    for name in configured {
        if rules.iter().any(|entry| entry.rule.name() == name.as_str()) {
            continue;
        }
        match rule_by_name(name) {
            Some(rule) => rules.push(PresetRule {
                rule,
                options: RuleOptions::default(),
            }),
            None => tracing::warn!("Unknown rule in config: {}", name),
        }
    }

    rules
}

/// Rules named on the command line, keeping preset options where the preset has the rule.
fn filter_rules(preset: Preset, names: &[&str]) -> Vec<PresetRule> {
    let mut defaults = preset.rules();
    let mut rules = Vec::new();

    for name in names {
        let Some(rule) = rule_by_name(name) else {
            tracing::warn!("Unknown rule: {}", name);
            continue;
        };
        let options = defaults
            .iter()
            .position(|entry| entry.rule.name() == rule.name())
            .map(|i| defaults.swap_remove(i).options)
            .unwrap_or_default();
        rules.push(PresetRule { rule, options });
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[PresetRule]) -> Vec<&'static str> {
        rules.iter().map(|entry| entry.rule.name()).collect()
    }

    #[test]
    fn configured_rules_extend_the_preset() {
        let config = Config::parse(
            r#"
[rules.rule-no-single-line]
severity = "error"

[rules.no-such-rule]
enabled = true
"#,
        )
        .unwrap();
        let rules = preset_with_configured(Preset::Recommended, &config);
        assert_eq!(
            names(&rules),
            vec![
                "font-weight-notation",
                "media-feature-range-operator-space-after",
                "rule-no-single-line",
            ]
        );
    }

    #[test]
    fn filter_keeps_preset_options() {
        let rules = filter_rules(Preset::Recommended, &["SL001", "rule-no-single-line", "bogus"]);
        assert_eq!(
            names(&rules),
            vec!["font-weight-notation", "rule-no-single-line"]
        );
        assert_eq!(rules[0].options.primary_str(), Some("numeric"));
        assert!(rules[1].options.is_empty());
    }
}
