//! Shared output formatting for lint results.

use anyhow::Result;
use serde::Serialize;
use sheetlint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// JSON document printed by `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    violations: &'a [Violation],
}

/// Print lint results in the specified format.
///
/// `root` is where the violations' relative paths resolve; the fancy format
/// reads the sources from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Fancy => print_fancy(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let (errors, warnings, infos) = result.count_by_severity();
    let report = JsonReport {
        files_checked: result.files_checked,
        errors,
        warnings,
        infos,
        violations: &result.violations,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_fancy(result: &LintResult, root: &Path) {
    for violation in &result.violations {
        let path = root.join(&violation.location.file);
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                let report = miette::Report::new(ViolationDiagnostic::new(violation, source));
                eprintln!("{report:?}");
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for snippet: {}", path.display(), e);
                println!("{violation}");
            }
        }
    }
    print_summary(result);
}
