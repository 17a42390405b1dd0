//! Core analyzer for orchestrating lint execution.

use crate::ast::{self, LineIndex};
use crate::config::Config;
use crate::context::FileContext;
use crate::options::RuleOptions;
use crate::report::Reporter;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a stylesheet.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message, including line and column.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

struct Registered {
    rule: RuleBox,
    options: RuleOptions,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<Registered>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule with no options.
    #[must_use]
    pub fn rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.rule_box_with_options(Box::new(rule), RuleOptions::default())
    }

    /// Adds a rule with default options; configured options take precedence.
    #[must_use]
    pub fn rule_with_options<R: Rule + 'static>(self, rule: R, options: RuleOptions) -> Self {
        self.rule_box_with_options(Box::new(rule), options)
    }

    /// Adds a boxed rule with no options.
    #[must_use]
    pub fn rule_box(self, rule: RuleBox) -> Self {
        self.rule_box_with_options(rule, RuleOptions::default())
    }

    /// Adds a boxed rule with default options; configured options take precedence.
    #[must_use]
    pub fn rule_box_with_options(mut self, rule: RuleBox, options: RuleOptions) -> Self {
        self.rules.push(Registered { rule, options });
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern, relative to the root.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Disabled rules are dropped here and each remaining rule's options are
    /// resolved once: configured options are layered over the registered
    /// defaults, so a configured secondary key keeps the default primary.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        if exclude_patterns.is_empty() {
            exclude_patterns.extend([
                "**/node_modules/**".to_string(),
                "**/vendor/**".to_string(),
            ]);
        }

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let rules = self
            .rules
            .into_iter()
            .filter(|registered| {
                let enabled = config.is_rule_enabled(registered.rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", registered.rule.name());
                }
                enabled
            })
            .map(|registered| Registered {
                options: match config.rule_options(registered.rule.name()) {
                    Some(configured) => configured.layered_over(registered.options),
                    None => registered.options,
                },
                rule: registered.rule,
            })
            .collect();

        Ok(Analyzer {
            root,
            rules,
            exclude_patterns,
            include_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<Registered>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the resolved options for an enabled rule.
    #[must_use]
    pub fn rule_options(&self, rule_name: &str) -> Option<&RuleOptions> {
        self.rules
            .iter()
            .find(|registered| registered.rule.name() == rule_name)
            .map(|registered| &registered.options)
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// fails to parse and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.lint_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        sort_violations(&mut result.violations);

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints an in-memory stylesheet as if it lived at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the source is not a well-formed stylesheet.
    pub fn lint_source(&self, path: &Path, source: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let root = ast::parse(source).map_err(|e| {
            let (line, column) = LineIndex::new(source).line_col(source, e.offset());
            AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: format!("{e} (line {line}, column {column})"),
            }
        })?;

        let ctx = FileContext::new(path, &root, &self.root);
        let mut violations = Vec::new();

        for registered in &self.rules {
            let name = registered.rule.name();
            let mut reporter = Reporter::new(&ctx, registered.rule.as_ref());
            if let Some(severity) = self.config.rule_severity(name) {
                reporter = reporter.with_severity(severity);
            }
            registered
                .rule
                .check(&root, &registered.options, &mut reporter);
            let rule_violations = reporter.into_violations();
            debug!("{} reported {} violations", name, rule_violations.len());
            violations.extend(rule_violations);
        }

        sort_violations(&mut violations);
        Ok(violations)
    }

    /// Discovers all stylesheets to analyze, in path order.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let patterns = if self.include_patterns.is_empty() {
            vec![format!("{}/**/*.css", self.root.display())]
        } else {
            self.include_patterns
                .iter()
                .map(|p| format!("{}/{}", self.root.display(), p))
                .collect()
        };

        let mut files = BTreeSet::new();
        for pattern in &patterns {
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

                if !path.is_file() {
                    continue;
                }
                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.insert(path);
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // "**/vendor/**" also excludes any path containing "/vendor/"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
    });
}
