//! Configuration loading and layering
//!
//! Handles reading config files and resolving them according to precedence rules.
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Project config file (`styleconf.config.{yaml,yml,json}`)
//! 3. User defaults (`<config_dir>/defaults.yaml`)
//! 4. Built-in defaults

use super::{
    defaults,
    env::{EnvSource, SystemEnv},
    paths,
    resolver::resolve,
    schema::{RawConfig, ResolvedConfig},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Explicit config file, bypasses discovery
pub const ENV_CONFIG: &str = "STYLECONF_CONFIG";
/// Dark mode override
pub const ENV_DARK_MODE: &str = "STYLECONF_DARK_MODE";
/// Comma-separated content globs override
pub const ENV_CONTENT: &str = "STYLECONF_CONTENT";

/// A resolved configuration and the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// `None` when no project config file was found
    pub path: Option<PathBuf>,
    pub config: ResolvedConfig,
}

/// Where the user defaults file comes from
enum UserDefaults {
    /// `<config_dir>/defaults.yaml`, with `config_dir` read from the env source
    Standard,
    File(PathBuf),
    Disabled,
}

/// Configuration loader
pub struct ConfigLoader {
    env: Box<dyn EnvSource>,
    user_defaults: UserDefaults,
    explicit_config: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the process environment and the user defaults file
    pub fn new() -> Self {
        Self {
            env: Box::new(SystemEnv),
            user_defaults: UserDefaults::Standard,
            explicit_config: None,
        }
    }

    /// Replace the environment source
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Use a different user defaults file, or none at all
    pub fn with_user_defaults(mut self, path: Option<PathBuf>) -> Self {
        self.user_defaults = match path {
            Some(path) => UserDefaults::File(path),
            None => UserDefaults::Disabled,
        };
        self
    }

    /// Load this file instead of discovering one
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_config = path;
        self
    }

    /// Load and resolve the configuration for the project containing `start_dir`
    pub fn load(&self, start_dir: &Path) -> Result<LoadedConfig> {
        let defaults = self.load_defaults()?;

        let path = self.config_path(start_dir);
        let raw = match &path {
            Some(path) => Self::load_file(path)?,
            None => {
                tracing::warn!(
                    "No config file found from {}, using defaults",
                    start_dir.display()
                );
                RawConfig::default()
            }
        };

        let raw = self.apply_env_overrides(raw);

        let config = resolve(raw, &defaults).with_context(|| match &path {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration".to_string(),
        })?;

        Ok(LoadedConfig { path, config })
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self, start_dir: &Path) -> Result<()> {
        self.load(start_dir).map(|_| ())
    }

    /// The config file that `load` would read
    pub fn config_path(&self, start_dir: &Path) -> Option<PathBuf> {
        self.explicit_config
            .clone()
            .or_else(|| self.env.var(ENV_CONFIG).map(PathBuf::from))
            .or_else(|| paths::discover_config(start_dir))
    }

    /// Built-in defaults with the user defaults file resolved on top
    pub fn load_defaults(&self) -> Result<ResolvedConfig> {
        let builtin = defaults::default_config();

        let Some(path) = self.user_defaults_path().filter(|p| p.exists()) else {
            return Ok(builtin);
        };

        tracing::debug!("Applying user defaults from {}", path.display());
        let raw = Self::load_file(&path)?;
        let resolved = resolve(raw, &builtin)
            .with_context(|| format!("Invalid user defaults in {}", path.display()))?;
        Ok(resolved)
    }

    /// The user defaults file consulted by `load_defaults`, if enabled
    pub fn user_defaults_path(&self) -> Option<PathBuf> {
        match &self.user_defaults {
            UserDefaults::Standard => Some(paths::user_defaults_path(self.env.as_ref())),
            UserDefaults::File(path) => Some(path.clone()),
            UserDefaults::Disabled => None,
        }
    }

    /// Load a raw configuration from a YAML or JSON file
    pub fn load_file(path: &Path) -> Result<RawConfig> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let raw: RawConfig = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else if contents.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        tracing::debug!("Loaded config file: {}", path.display());
        Ok(raw)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, mut raw: RawConfig) -> RawConfig {
        // STYLECONF_DARK_MODE override, validated like any other value
        if let Some(dark_mode) = self.env.var(ENV_DARK_MODE) {
            tracing::debug!("{} overrides darkMode", ENV_DARK_MODE);
            raw.dark_mode = Some(dark_mode);
        }

        // STYLECONF_CONTENT override
        if let Some(content) = self.env.var(ENV_CONTENT) {
            let globs: Vec<String> = content
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !globs.is_empty() {
                tracing::debug!("{} overrides content", ENV_CONTENT);
                raw.content = Some(globs);
            }
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MockEnvSource;
    use crate::config::error::ResolveError;
    use crate::config::schema::DarkMode;

    fn quiet_env() -> MockEnvSource {
        let mut env = MockEnvSource::new();
        env.expect_var().returning(|_| None);
        env
    }

    fn loader(env: MockEnvSource) -> ConfigLoader {
        ConfigLoader::new().with_env(env).with_user_defaults(None)
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styleconf.config.yaml");
        std::fs::write(&path, "darkMode: class\n").unwrap();

        let raw = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(raw.dark_mode.as_deref(), Some("class"));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styleconf.config.json");
        std::fs::write(&path, r#"{"content": ["./web/**/*.html"]}"#).unwrap();

        let raw = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(raw.content, Some(vec!["./web/**/*.html".to_string()]));
    }

    #[test]
    fn test_load_empty_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styleconf.config.yaml");
        std::fs::write(&path, "\n").unwrap();

        assert_eq!(ConfigLoader::load_file(&path).unwrap(), RawConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = loader(quiet_env()).load(dir.path()).unwrap();
        assert!(loaded.path.is_none());
        assert_eq!(loaded.config, defaults::default_config());
    }

    #[test]
    fn test_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("styleconf.config.yaml"),
            "darkMode: media\ncontent: [./index.html]\n",
        )
        .unwrap();

        let mut env = MockEnvSource::new();
        env.expect_var().returning(|key| match key {
            ENV_DARK_MODE => Some("class".to_string()),
            ENV_CONTENT => Some("./a/**/*.vue, ./b/**/*.ts,".to_string()),
            _ => None,
        });

        let loaded = loader(env).load(dir.path()).unwrap();
        assert_eq!(loaded.config.dark_mode(), DarkMode::Class);
        assert_eq!(
            loaded.config.content(),
            ["./a/**/*.vue".to_string(), "./b/**/*.ts".to_string()]
        );
    }

    #[test]
    fn test_invalid_env_dark_mode_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = MockEnvSource::new();
        env.expect_var().returning(|key| match key {
            ENV_DARK_MODE => Some("dim".to_string()),
            _ => None,
        });

        let err = loader(env).load(dir.path()).unwrap_err();
        let resolve_err = err.downcast_ref::<ResolveError>().unwrap();
        assert!(resolve_err.for_field("darkMode").is_some());
    }

    #[test]
    fn test_env_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.json");
        std::fs::write(&custom, r#"{"darkMode": "class"}"#).unwrap();

        let custom_str = custom.to_string_lossy().to_string();
        let mut env = MockEnvSource::new();
        env.expect_var().returning(move |key| match key {
            ENV_CONFIG => Some(custom_str.clone()),
            _ => None,
        });

        let loaded = loader(env).load(dir.path()).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(custom.as_path()));
        assert_eq!(loaded.config.dark_mode(), DarkMode::Class);
    }

    #[test]
    fn test_user_defaults_layered_under_project() {
        let dir = tempfile::tempdir().unwrap();
        let user_defaults = dir.path().join("defaults.yaml");
        std::fs::write(
            &user_defaults,
            "darkMode: class\ntheme:\n  extend:\n    colors:\n      brand: \"#0af\"\n",
        )
        .unwrap();

        let project = dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(
            project.join("styleconf.config.yaml"),
            "theme:\n  extend:\n    colors:\n      accent: \"#f0a\"\n",
        )
        .unwrap();

        let loaded = ConfigLoader::new()
            .with_env(quiet_env())
            .with_user_defaults(Some(user_defaults))
            .load(&project)
            .unwrap();

        assert_eq!(loaded.config.dark_mode(), DarkMode::Class);
        assert_eq!(loaded.config.color("brand"), Some("#0af"));
        assert_eq!(loaded.config.color("accent"), Some("#f0a"));
        assert_eq!(loaded.config.color("black"), Some("#000000"));
    }

    #[test]
    fn test_user_defaults_found_through_env_config_dir() {
        let config_dir = tempfile::tempdir().unwrap();
        std::fs::write(config_dir.path().join("defaults.yaml"), "darkMode: class
").unwrap();
        let project = tempfile::tempdir().unwrap();

        let dir_str = config_dir.path().to_string_lossy().to_string();
        let mut env = MockEnvSource::new();
        env.expect_var().returning(move |key| match key {
            paths::ENV_CONFIG_DIR => Some(dir_str.clone()),
            _ => None,
        });

        let loader = ConfigLoader::new().with_env(env);
        assert_eq!(
            loader.user_defaults_path(),
            Some(config_dir.path().join("defaults.yaml"))
        );

        let loaded = loader.load(project.path()).unwrap();
        assert_eq!(loaded.config.dark_mode(), DarkMode::Class);
    }

    #[test]
    fn test_disabled_user_defaults() {
        let loader = ConfigLoader::new()
            .with_env(quiet_env())
            .with_user_defaults(None);
        assert!(loader.user_defaults_path().is_none());
    }
}
