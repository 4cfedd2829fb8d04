//! CLI command handlers

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use std::path::Path;

use crate::config::{ConfigLoader, ResolveError, ResolvedConfig, get_config_value};

/// Output format for printed configurations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration
    Resolve {
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Validate configuration and report every problem
    Validate,
    /// Get a resolved configuration value
    Get {
        /// Configuration key (e.g., "darkMode", "colors.up-red", "theme.spacing")
        key: String,
    },
    /// List color tokens with their RGB components
    Tokens,
    /// Print the effective defaults (built-in plus user defaults file)
    Defaults {
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Show the configuration file path
    Path,
    /// Show version information
    Version,
}

/// Handle a subcommand for the project containing `start_dir`
pub fn handle_command(cmd: Command, loader: &ConfigLoader, start_dir: &Path) -> Result<()> {
    match cmd {
        Command::Resolve { format } => {
            let loaded = loader.load(start_dir)?;
            print!("{}", render_config(&loaded.config, format)?);
        }
        Command::Validate => match loader.load(start_dir) {
            Ok(loaded) => {
                match loaded.path {
                    Some(path) => println!("Configuration is valid: {}", path.display()),
                    None => println!("Configuration is valid (built-in defaults)"),
                }
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {}", e);
                if let Some(resolve_err) = e.downcast_ref::<ResolveError>() {
                    eprintln!("{}", resolve_err);
                } else {
                    for cause in e.chain().skip(1) {
                        eprintln!("  caused by: {}", cause);
                    }
                }
                std::process::exit(1);
            }
        },
        Command::Get { key } => {
            let loaded = loader.load(start_dir)?;
            println!("{}", get_config_value(&loaded.config, &key)?.trim_end());
        }
        Command::Tokens => {
            let loaded = loader.load(start_dir)?;
            print!("{}", render_tokens(&loaded.config));
        }
        Command::Defaults { format } => {
            let defaults = loader
                .load_defaults()
                .context("Failed to load default configuration")?;
            print!("{}", render_config(&defaults, format)?);
        }
        Command::Path => match loader.config_path(start_dir) {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!("No config file found from {}", start_dir.display());
                std::process::exit(1);
            }
        },
        Command::Version => super::display_version(),
    }

    Ok(())
}

/// Serialize a resolved configuration
pub fn render_config(config: &ResolvedConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(config).context("Failed to serialize configuration")
        }
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .map(|json| json + "\n")
            .context("Failed to serialize configuration"),
    }
}

/// One line per color token: name, hex value, RGB components
pub fn render_tokens(config: &ResolvedConfig) -> String {
    let width = config
        .colors()
        .keys()
        .map(String::len)
        .max()
        .unwrap_or(0);

    config
        .color_tokens()
        .iter()
        .map(|token| match token.value.to_rgb() {
            Some([r, g, b]) => format!(
                "{:<width$}  {:<7}  rgb({}, {}, {})\n",
                token.name, token.value, r, g, b
            ),
            None => format!("{:<width$}  {}\n", token.name, token.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawConfig, defaults::default_config, resolve};

    #[test]
    fn test_render_json() {
        let json = render_config(&default_config(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["darkMode"], "media");
        assert_eq!(value["theme"]["colors"]["white"], "#ffffff");
    }

    #[test]
    fn test_render_yaml_parses_back() {
        let yaml = render_config(&default_config(), OutputFormat::Yaml).unwrap();
        let raw: RawConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(raw.dark_mode.as_deref(), Some("media"));
    }

    #[test]
    fn test_render_tokens() {
        let raw: RawConfig =
            serde_yaml::from_str("theme:\n  colors:\n    up-red: \"#ff333a\"\n    ok: \"#0f0\"\n")
                .unwrap();
        let config = resolve(raw, &default_config()).unwrap();
        let output = render_tokens(&config);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok      #0f0     rgb(0, 255, 0)");
        assert_eq!(lines[1], "up-red  #ff333a  rgb(255, 51, 58)");
    }
}
