//! Init command implementation.

use anyhow::{anyhow, bail, Context, Result};
use sheetlint_rules::Preset;
use std::path::Path;

const CONFIG_FILE: &str = "sheetlint.toml";

const HEADER: &str = r#"# sheetlint configuration
#
# [analyzer] root / exclude / include control which stylesheets are read.
# Each [rules.<name>] table may set:
#   enabled  = false          # turn the rule off
#   severity = "warning"      # override the default severity
#   primary  = ...            # the rule's primary option
#   <key>    = ...            # secondary options, e.g. ignore-values = ["/^light/"]
#
# Silence a single line with:
#   /* sheetlint: allow(rule-name) reason="why" */

"#;

/// Renders the configuration template for a preset.
pub fn render(preset_name: &str) -> Result<String> {
    let preset: Preset = preset_name.parse().map_err(|e: String| anyhow!(e))?;

    let mut analyzer = toml::Table::new();
    analyzer.insert(
        "exclude".to_string(),
        toml::Value::Array(vec![
            "**/node_modules/**".into(),
            "**/vendor/**".into(),
            "**/dist/**".into(),
        ]),
    );

    let mut rules = toml::Table::new();
    for entry in preset.rules() {
        let mut rule = toml::Table::new();
        rule.insert("enabled".to_string(), toml::Value::Boolean(true));
        if let Some(primary) = entry.options.primary {
            rule.insert("primary".to_string(), primary);
        }
        for (key, value) in entry.options.secondary.unwrap_or_default() {
            rule.insert(key, value);
        }
        rules.insert(entry.rule.name().to_string(), toml::Value::Table(rule));
    }

    let mut tables = toml::Table::new();
    tables.insert("analyzer".to_string(), toml::Value::Table(analyzer));
    tables.insert("rules".to_string(), toml::Value::Table(rules));

    let preset_line = toml::Value::String(preset_name.to_string());
    let body = toml::to_string(&tables).context("Failed to render configuration")?;
    Ok(format!("{HEADER}preset = {preset_line}\n\n{body}"))
}

/// Writes the template into `dir`.
fn write_config(dir: &Path, force: bool, preset_name: &str) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, render(preset_name)?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

/// Runs the init command.
pub fn run(force: bool, preset_name: &str) -> Result<()> {
    write_config(Path::new("."), force, preset_name)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: sheetlint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn template_round_trips_through_config() {
        let config = Config::parse(&render("strict").unwrap()).unwrap();
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.rules.len(), Preset::Strict.rules().len());
        assert_eq!(
            config
                .rule_options("font-weight-notation")
                .and_then(|o| o.primary_str().map(str::to_string)),
            Some("numeric".to_string())
        );
        assert!(config.analyzer.exclude.iter().any(|p| p.contains("node_modules")));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(render("lenient").is_err());
    }

    #[test]
    fn existing_file_needs_force() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), false, "minimal").unwrap();
        assert!(write_config(tmp.path(), false, "minimal").is_err());
        write_config(tmp.path(), true, "recommended").unwrap();

        let written = std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap();
        assert!(written.starts_with("# sheetlint configuration"));
        assert!(written.contains("preset = \"recommended\""));
    }
}
