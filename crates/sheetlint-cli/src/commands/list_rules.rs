//! List rules command implementation.

use sheetlint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<42} Description", "Code", "Name");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<42} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for (name, preset) in [
        ("recommended", Preset::Recommended),
        ("strict", Preset::Strict),
        ("minimal", Preset::Minimal),
    ] {
        let codes: Vec<_> = preset.rules().iter().map(|entry| entry.rule.code()).collect();
        println!("  {:<12} - {}", name, codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  sheetlint check --rules font-weight-notation,rule-no-single-line");
    println!("  sheetlint check --rules SL001,SL004");
}
