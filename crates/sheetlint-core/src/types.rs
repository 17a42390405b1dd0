//! Core types for lint violations and results.

use crate::ast::{LineIndex, NodeKind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity \"{other}\"")),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
    /// Absolute byte offset in the file.
    pub offset: usize,
}

impl Location {
    /// Creates a location for an absolute offset in `source`.
    #[must_use]
    pub fn from_offset(file: PathBuf, index: &LineIndex, source: &str, offset: usize) -> Self {
        let (line, column) = index.line_col(source, offset);
        Self {
            file,
            line,
            column,
            offset,
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Whether a violation is about the stylesheet or about the rule's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A token in the stylesheet broke the rule's policy.
    Policy,
    /// The rule's options failed validation; the rule did not run.
    InvalidOption,
}

/// A message a rule can report.
///
/// `key` is the stable symbolic name of the message; `Display` renders the text.
pub trait RuleMessage: fmt::Display {
    /// Returns the symbolic key (e.g. `"expected"`).
    fn key(&self) -> &'static str;
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "SL001").
    pub code: String,
    /// Rule name (e.g., "font-weight-notation").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Policy or configuration violation.
    pub kind: ViolationKind,
    /// Location of the first character of the offending token.
    pub location: Location,
    /// Node the violation was found on; `None` for configuration violations.
    pub node: Option<NodeKind>,
    /// Symbolic message key.
    pub message_key: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new policy violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: &dyn RuleMessage,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            kind: ViolationKind::Policy,
            location,
            node: None,
            message_key: message.key().to_string(),
            message: message.to_string(),
            suggestion: None,
        }
    }

    /// Sets the node this violation is attached to.
    #[must_use]
    pub fn with_node(mut self, node: NodeKind) -> Self {
        self.node = Some(node);
        self
    }

    /// Sets the violation kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ViolationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation rendered as a miette diagnostic with its source snippet.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` over the file's `source`.
    #[must_use]
    pub fn new(violation: &Violation, source: String) -> Self {
        let offset = violation.location.offset.min(source.len());
        let length = usize::from(offset < source.len());
        Self {
            message: format!("[{}] {}", violation.code, violation.message),
            source_code: NamedSource::new(violation.location.file.display().to_string(), source),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((offset, length)),
            label_message: violation.rule.clone(),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(errors, warnings, infos), v| match v.severity {
                Severity::Error => (errors + 1, warnings, infos),
                Severity::Warning => (errors, warnings + 1, infos),
                Severity::Info => (errors, warnings, infos + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(&'static str);

    impl fmt::Display for Plain {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl RuleMessage for Plain {
        fn key(&self) -> &'static str {
            "plain"
        }
    }

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "SL001",
            "font-weight-notation",
            severity,
            Location::new(PathBuf::from("styles/main.css"), 3, 16),
            &Plain("Expected numeric font-weight notation"),
        )
    }

    #[test]
    fn violation_records_message_key() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.message_key, "plain");
        assert_eq!(v.kind, ViolationKind::Policy);
        assert!(v.node.is_none());
    }

    #[test]
    fn violation_display_is_compact() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "styles/main.css:3:16: warning [SL001] Expected numeric font-weight notation"
        );
    }

    #[test]
    fn location_from_offset() {
        let source = "a {\n  font-weight: bold;\n}";
        let index = LineIndex::new(source);
        let location = Location::from_offset(PathBuf::from("a.css"), &index, source, 19);
        assert_eq!((location.line, location.column), (2, 16));
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.count_by_severity(), (0, 1, 0));
    }
}
