//! Integration test: file discovery, exclusion and parse-error handling via Analyzer.

use sheetlint_core::options::validate_options;
use sheetlint_core::{
    Analyzer, AnalyzerError, NodeKind, Reporter, Root, Rule, RuleMessage, RuleOptions,
};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct EmptyRule;

impl fmt::Display for EmptyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unexpected empty rule")
    }
}

impl RuleMessage for EmptyRule {
    fn key(&self) -> &'static str {
        "rejected"
    }
}

/// Flags style rules with no children.
struct BlockNoEmpty;

impl Rule for BlockNoEmpty {
    fn name(&self) -> &'static str {
        "block-no-empty"
    }
    fn code(&self) -> &'static str {
        "TEST100"
    }
    fn check(&self, root: &Root, options: &RuleOptions, reporter: &mut Reporter<'_>) {
        if !validate_options(reporter, options, &[], &[]) {
            return;
        }
        root.walk_rules(|rule| {
            if rule.nodes.is_empty() {
                reporter.report(&EmptyRule, NodeKind::Rule, rule.span.start);
            }
        });
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "styles/main.css", "a {}\nb { color: red; }\n");
    write(dir.path(), "styles/nested/deep.css", "@media print {\n  c {}\n}\n");
    write(dir.path(), "node_modules/pkg/reset.css", "d {}\n");
    write(dir.path(), "styles/notes.txt", "e {}\n");
    dir
}

fn files(violations: &[sheetlint_core::Violation]) -> Vec<PathBuf> {
    violations.iter().map(|v| v.location.file.clone()).collect()
}

#[test]
fn discovers_css_outside_excluded_dirs() {
    let dir = project();
    let result = Analyzer::builder()
        .root(dir.path())
        .rule(BlockNoEmpty)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 2);
    assert_eq!(
        files(&result.violations),
        vec![
            PathBuf::from("styles/main.css"),
            PathBuf::from("styles/nested/deep.css"),
        ]
    );
    let deep = &result.violations[1];
    assert_eq!((deep.location.line, deep.location.column), (2, 3));
}

#[test]
fn include_patterns_narrow_discovery() {
    let dir = project();
    let result = Analyzer::builder()
        .root(dir.path())
        .include("styles/nested/**/*.css")
        .rule(BlockNoEmpty)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(
        files(&result.violations),
        vec![PathBuf::from("styles/nested/deep.css")]
    );
}

#[test]
fn parse_errors_are_skipped_by_default() {
    let dir = project();
    write(dir.path(), "styles/broken.css", "a { color: red;\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .rule(BlockNoEmpty)
        .build()
        .unwrap()
        .analyze()
        .unwrap();
    assert_eq!(result.files_checked, 2);

    let err = Analyzer::builder()
        .root(dir.path())
        .rule(BlockNoEmpty)
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze()
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Parse { .. }));
}

#[test]
fn allow_directive_suppresses_with_reason() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "a.css",
        "/* sheetlint: allow(block-no-empty) reason=\"placeholder for theme\" */\na {}\nb {}\n",
    );

    let result = Analyzer::builder()
        .root(dir.path())
        .rule(BlockNoEmpty)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.line, 3);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(BlockNoEmpty)
        .build()
        .unwrap();

    let first = analyzer.analyze().unwrap();
    let second = analyzer.analyze().unwrap();
    let render = |r: &sheetlint_core::LintResult| {
        r.violations.iter().map(ToString::to_string).collect::<Vec<_>>()
    };
    assert_eq!(render(&first), render(&second));
}
