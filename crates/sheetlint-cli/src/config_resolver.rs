//! Configuration file lookup.
//!
//! The first match wins:
//!
//! 1. `--config` flag (or `$SHEETLINT_CONFIG`)
//! 2. `sheetlint.toml` or `.sheetlint.toml` in the checked directory or the
//!    nearest ancestor that has one
//! 3. `config.toml` in the global directory (`$SHEETLINT_CONFIG_DIR`, else `~/.sheetlint/`)
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found next to the stylesheets or above them.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["sheetlint.toml", ".sheetlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a check of `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    let source = resolve_inner(target, explicit, global_config_dir());
    tracing::debug!("Configuration: {}", source);
    source
}

/// Lookup with the global directory passed in, so tests need no env vars.
fn resolve_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Searches `start` and its ancestors for a project config file.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    // Relative paths like "." have no ancestors of their own.
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the global config directory: `$SHEETLINT_CONFIG_DIR`, else `~/.sheetlint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("SHEETLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".sheetlint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical(tmp: &TempDir) -> PathBuf {
        tmp.path().canonicalize().unwrap()
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sheetlint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/missing.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/missing.toml")));
    }

    #[test]
    fn plain_name_preferred_over_dot_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".sheetlint.toml"), "").unwrap();
        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join(".sheetlint.toml"))
        );

        fs::write(tmp.path().join("sheetlint.toml"), "").unwrap();
        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("sheetlint.toml"))
        );
    }

    #[test]
    fn nearest_ancestor_config_is_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sheetlint.toml"), "").unwrap();
        let nested = tmp.path().join("src/styles");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("main.css"), "").unwrap();

        let expected = ConfigSource::Project(canonical(&tmp).join("sheetlint.toml"));
        assert_eq!(resolve_inner(&nested, None, None), expected);
        assert_eq!(resolve_inner(&nested.join("main.css"), None, None), expected);

        fs::write(nested.join(".sheetlint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(&nested, None, None),
            ConfigSource::Project(nested.canonicalize().unwrap().join(".sheetlint.toml"))
        );
    }

    #[test]
    fn global_fallback_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
        assert!(result.is_global());

        fs::write(project.path().join("sheetlint.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert_eq!(result.to_string(), "built-in defaults");
    }
}
