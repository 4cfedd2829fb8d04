//! Configuration file locations
//!
//! Two kinds of paths live here:
//! - the per-user config directory holding `defaults.yaml`
//!   - Linux/macOS: XDG Base Directory specification (~/.config)
//!   - Windows: Known Folder API (AppData\Roaming)
//! - the project config file, discovered by walking up from a start directory

use super::env::EnvSource;
use std::path::{Path, PathBuf};

/// Project config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "styleconf.config.yaml",
    "styleconf.config.yml",
    "styleconf.config.json",
];

/// Marker for the top of a project; discovery does not climb above it
const PROJECT_ROOT_MARKER: &str = ".git";

/// Overrides the per-user config directory
pub const ENV_CONFIG_DIR: &str = "STYLECONF_CONFIG_DIR";

const APP_NAME: &str = "styleconf";

/// Get the per-user configuration directory
///
/// `STYLECONF_CONFIG_DIR` wins, then `$XDG_CONFIG_HOME/styleconf` on Unix,
/// then the platform default from `directories`.
pub fn config_dir(env: &dyn EnvSource) -> PathBuf {
    if let Some(dir) = env.var(ENV_CONFIG_DIR).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    if !cfg!(windows) {
        if let Some(xdg) = env.var("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
            return PathBuf::from(xdg).join(APP_NAME);
        }
    }

    platform_config_dir().unwrap_or_else(|| PathBuf::from(".config").join(APP_NAME))
}

#[cfg(windows)]
fn platform_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(not(windows))]
fn platform_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join(APP_NAME))
}

/// Get the user defaults file path
pub fn user_defaults_path(env: &dyn EnvSource) -> PathBuf {
    config_dir(env).join("defaults.yaml")
}

/// Find a config file directly inside `dir`
pub fn find_config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Discover the project config file
///
/// Walks from `start` up through its ancestors and returns the first match.
/// Stops after the first directory containing `.git`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if let Some(path) = find_config_in(dir) {
            tracing::debug!("Found config file: {}", path.display());
            return Some(path);
        }
        if dir.join(PROJECT_ROOT_MARKER).exists() {
            tracing::debug!("Reached project root without a config file: {}", dir.display());
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MockEnvSource;

    fn env_with(vars: &'static [(&'static str, &'static str)]) -> MockEnvSource {
        let mut env = MockEnvSource::new();
        env.expect_var().returning(move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        });
        env
    }

    #[test]
    fn test_config_dir_override() {
        let env = env_with(&[
            (ENV_CONFIG_DIR, "/opt/styleconf"),
            ("XDG_CONFIG_HOME", "/xdg"),
        ]);
        assert_eq!(config_dir(&env), PathBuf::from("/opt/styleconf"));
        assert_eq!(
            user_defaults_path(&env),
            PathBuf::from("/opt/styleconf").join("defaults.yaml")
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_config_dir_xdg() {
        let env = env_with(&[("XDG_CONFIG_HOME", "/xdg")]);
        assert_eq!(config_dir(&env), PathBuf::from("/xdg").join("styleconf"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_config_dir_platform_fallback() {
        let env = env_with(&[(ENV_CONFIG_DIR, "")]);
        assert!(config_dir(&env).ends_with("styleconf"));
    }

    #[test]
    fn test_find_config_priority() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("styleconf.config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("styleconf.config.yaml"), "{}").unwrap();

        let found = find_config_in(dir.path()).unwrap();
        assert!(found.ends_with("styleconf.config.yaml"));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("styleconf.config.yml"), "{}").unwrap();
        let nested = dir.path().join("src").join("components");
        std::fs::create_dir_all(&nested).unwrap();

        let found = discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("styleconf.config.yml"));
    }

    #[test]
    fn test_discover_stops_at_project_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("styleconf.config.yaml"), "{}").unwrap();
        let project = dir.path().join("project");
        std::fs::create_dir_all(project.join(".git")).unwrap();

        assert!(discover_config(&project).is_none());
    }
}
