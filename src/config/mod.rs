//! Configuration system for styleconf
//!
//! Turns a user-authored styling configuration (content globs, dark mode
//! strategy, theme extensions, plugins) into a validated [`ResolvedConfig`].
//! Resolution is pure and lives in [`resolver`]. File discovery and layering
//! live in [`loader`].

pub mod color;
pub mod defaults;
pub mod env;
pub mod error;
pub mod loader;
pub mod paths;
pub mod resolver;
pub mod schema;

pub use color::{ColorToken, ColorValue, HexColor};
pub use env::{EnvSource, SystemEnv};
pub use error::{ConfigError, ResolveError};
pub use loader::{ConfigLoader, LoadedConfig};
pub use resolver::resolve;
pub use schema::{
    DarkMode, PluginDescriptor, RawConfig, RawTheme, ResolvedConfig, ResolvedTheme, ThemeExtend,
};

/// Get a resolved configuration value by key (dot notation)
pub fn get_config_value(config: &ResolvedConfig, key: &str) -> anyhow::Result<String> {
    match key {
        "content" => Ok(config.content().join("\n")),
        "darkMode" => Ok(config.dark_mode().to_string()),
        "plugins" => serde_yaml::to_string(config.plugins())
            .map_err(|e| anyhow::anyhow!("Failed to serialize plugins: {}", e)),
        "colors" => Ok(config
            .colors()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => {
            if let Some(name) = key.strip_prefix("colors.") {
                return config
                    .color(name)
                    .map(str::to_string)
                    .ok_or_else(|| anyhow::anyhow!("Unknown color token: {}", name));
            }
            if let Some(section) = key.strip_prefix("theme.") {
                if section == "colors" {
                    return get_config_value(config, "colors");
                }
                let value = config
                    .theme()
                    .section(section)
                    .ok_or_else(|| anyhow::anyhow!("Unknown theme section: {}", section))?;
                return serde_yaml::to_string(value).map_err(|e| {
                    anyhow::anyhow!("Failed to serialize theme.{}: {}", section, e)
                });
            }
            Err(anyhow::anyhow!("Unknown configuration key: {}", key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolvedConfig {
        let yaml = r##"
darkMode: class
theme:
  extend:
    colors:
      up-red: "#ff333a"
    fontFamily:
      display: [Inter, sans-serif]
plugins: [forms]
"##;
        let raw: RawConfig = serde_yaml::from_str(yaml).unwrap();
        resolve(raw, &defaults::default_config()).unwrap()
    }

    #[test]
    fn test_get_dark_mode() {
        assert_eq!(get_config_value(&sample(), "darkMode").unwrap(), "class");
    }

    #[test]
    fn test_get_color() {
        assert_eq!(
            get_config_value(&sample(), "colors.up-red").unwrap(),
            "#ff333a"
        );
        assert!(get_config_value(&sample(), "colors.missing").is_err());
    }

    #[test]
    fn test_get_colors_lists_tokens() {
        let colors = get_config_value(&sample(), "colors").unwrap();
        assert!(colors.contains("up-red: #ff333a"));
        assert!(colors.contains("black: #000000"));
    }

    #[test]
    fn test_get_theme_section() {
        let value = get_config_value(&sample(), "theme.fontFamily").unwrap();
        assert!(value.contains("Inter"));
    }

    #[test]
    fn test_get_plugins() {
        let value = get_config_value(&sample(), "plugins").unwrap();
        assert!(value.contains("forms"));
    }

    #[test]
    fn test_unknown_key() {
        let err = get_config_value(&sample(), "prefix").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }
}
