//! Configuration types for sheetlint.

use crate::options::RuleOptions;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for sheetlint.
///
/// ```toml
/// preset = "recommended"
///
/// [analyzer]
/// exclude = ["**/vendor/**"]
///
/// [rules.font-weight-notation]
/// primary = "numeric"
/// ignore-values = ["/^var/"]
///
/// [rules.rule-no-single-line]
/// severity = "warning"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold that fails the run (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configured options for a rule, if any were set.
    #[must_use]
    pub fn rule_options(&self, rule_name: &str) -> Option<RuleOptions> {
        self.rules.get(rule_name).and_then(RuleConfig::to_options)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, all *.css files).
    #[serde(default)]
    pub include: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/vendor/**".to_string(),
            ],
            include: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
///
/// Every key other than `enabled`, `severity` and `primary` is a secondary option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// The rule's primary option.
    #[serde(default)]
    pub primary: Option<toml::Value>,

    /// Secondary options as key-value pairs.
    #[serde(flatten)]
    pub options: toml::Table,
}

impl RuleConfig {
    /// Converts this entry to rule options, or `None` if it sets no option.
    #[must_use]
    pub fn to_options(&self) -> Option<RuleOptions> {
        if self.primary.is_none() && self.options.is_empty() {
            return None;
        }
        Some(RuleOptions {
            primary: self.primary.clone(),
            secondary: (!self.options.is_empty()).then(|| self.options.clone()),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.preset.is_none());
        assert!(config.is_rule_enabled("anything"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./styles"
exclude = ["**/generated/**"]

[rules.font-weight-notation]
primary = "numeric"
ignore-values = ["/^var/", "lighter"]

[rules.rule-no-single-line]
enabled = false
severity = "info"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.analyzer.root, PathBuf::from("./styles"));
        assert!(!config.is_rule_enabled("rule-no-single-line"));
        assert_eq!(
            config.rule_severity("rule-no-single-line"),
            Some(Severity::Info)
        );

        let options = config.rule_options("font-weight-notation").unwrap();
        assert_eq!(options.primary_str(), Some("numeric"));
        let ignore = options.secondary("ignore-values").unwrap();
        assert_eq!(ignore.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn entry_without_options_falls_back() {
        let config = Config::parse("[rules.rule-no-single-line]\nseverity = \"warning\"\n").unwrap();
        assert!(config.rule_options("rule-no-single-line").is_none());
    }

    #[test]
    fn rejects_unknown_severity() {
        let err = Config::parse("[rules.x]\nseverity = \"fatal\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
