//! Configuration resolution
//!
//! Merges a [`RawConfig`] over a set of defaults and validates the result.
//!
//! # Precedence
//!
//! - `content`: user globs if present and non-empty, otherwise the defaults
//! - `darkMode`: user value if present, otherwise the defaults
//! - colors: `theme.colors` replaces the default palette, then
//!   `theme.extend.colors` is merged on top (last write wins per token)
//! - other `theme.extend` sections: shallow-merged per section
//! - `plugins`: passed through in order
//!
//! Resolution is pure. Every problem is collected and returned together.

use super::color::{ColorValue, HexColor};
use super::error::{ConfigError, ResolveError};
use super::schema::{
    DarkMode, PluginDescriptor, RawConfig, RawTheme, ResolvedConfig, ResolvedTheme,
};
use std::collections::BTreeMap;

/// Resolve a raw configuration against defaults
pub fn resolve(raw: RawConfig, defaults: &ResolvedConfig) -> Result<ResolvedConfig, ResolveError> {
    let mut errors = Vec::new();

    let content = resolve_content(raw.content, defaults, &mut errors);
    let dark_mode = resolve_dark_mode(raw.dark_mode.as_deref(), defaults, &mut errors);
    let theme = resolve_theme(raw.theme, defaults, &mut errors);
    let plugins = resolve_plugins(raw.plugins, defaults, &mut errors);

    if let Some(err) = ResolveError::from_errors(errors) {
        tracing::debug!("Configuration rejected with {} problem(s)", err.len());
        return Err(err);
    }

    tracing::debug!(
        "Resolved configuration: {} content glob(s), darkMode={}, {} color token(s), {} plugin(s)",
        content.len(),
        dark_mode,
        theme.colors().len(),
        plugins.len()
    );

    Ok(ResolvedConfig::new(content, dark_mode, theme, plugins))
}

fn resolve_content(
    content: Option<Vec<String>>,
    defaults: &ResolvedConfig,
    errors: &mut Vec<ConfigError>,
) -> Vec<String> {
    let content = match content {
        Some(globs) if !globs.is_empty() => {
            for (index, glob) in globs.iter().enumerate() {
                if glob.trim().is_empty() {
                    errors.push(ConfigError::validation(
                        format!("content[{}]", index),
                        "glob pattern cannot be empty",
                    ));
                }
            }
            globs
        }
        _ => {
            tracing::debug!("No content globs configured, using defaults");
            defaults.content().to_vec()
        }
    };

    if content.is_empty() {
        errors.push(ConfigError::missing(
            "content",
            "no content globs configured and the defaults provide none",
        ));
    }

    content
}

fn resolve_dark_mode(
    dark_mode: Option<&str>,
    defaults: &ResolvedConfig,
    errors: &mut Vec<ConfigError>,
) -> DarkMode {
    match dark_mode {
        None => defaults.dark_mode(),
        Some(value) => value.parse().unwrap_or_else(|message: String| {
            errors.push(ConfigError::validation("darkMode", message));
            defaults.dark_mode()
        }),
    }
}

fn resolve_theme(
    theme: Option<RawTheme>,
    defaults: &ResolvedConfig,
    errors: &mut Vec<ConfigError>,
) -> ResolvedTheme {
    let RawTheme { colors, extend } = theme.unwrap_or_default();
    let extend = extend.unwrap_or_default();

    let mut resolved = match colors {
        Some(replacement) => {
            tracing::debug!("theme.colors replaces the default palette");
            validate_colors(&replacement, "theme.colors", errors)
        }
        None => defaults.colors().clone(),
    };

    if let Some(extension) = extend.colors {
        let extension = validate_colors(&extension, "theme.extend.colors", errors);
        for (name, value) in extension {
            if let Some(previous) = resolved.insert(name.clone(), value) {
                tracing::debug!("Color '{}' overrides {}", name, previous);
            }
        }
    }

    let mut sections = defaults.theme().sections().clone();
    for (name, value) in extend.sections {
        merge_section(&mut sections, name, value);
    }

    ResolvedTheme::new(resolved, sections)
}

/// Flatten and validate a colors map, reporting failures under `prefix`
fn validate_colors(
    colors: &BTreeMap<String, ColorValue>,
    prefix: &str,
    errors: &mut Vec<ConfigError>,
) -> BTreeMap<String, HexColor> {
    let mut valid = BTreeMap::new();

    for (name, value) in colors {
        if name.trim().is_empty() {
            errors.push(ConfigError::validation(
                prefix,
                "color token name cannot be empty",
            ));
            continue;
        }

        for (token, raw) in value.flatten(name) {
            match raw.and_then(|raw| HexColor::parse(&raw)) {
                Ok(color) => {
                    valid.insert(token, color);
                }
                Err(message) => {
                    errors.push(ConfigError::validation(
                        format!("{}.{}", prefix, token),
                        message,
                    ));
                }
            }
        }
    }

    valid
}

/// Shallow merge: object keys are merged with the extension winning,
/// anything else replaces the default section
fn merge_section(
    sections: &mut BTreeMap<String, serde_json::Value>,
    name: String,
    value: serde_json::Value,
) {
    match value {
        serde_json::Value::Object(overrides) => {
            if let Some(serde_json::Value::Object(base)) = sections.get_mut(&name) {
                base.extend(overrides);
            } else {
                sections.insert(name, serde_json::Value::Object(overrides));
            }
        }
        value => {
            sections.insert(name, value);
        }
    }
}

fn resolve_plugins(
    plugins: Option<Vec<PluginDescriptor>>,
    defaults: &ResolvedConfig,
    errors: &mut Vec<ConfigError>,
) -> Vec<PluginDescriptor> {
    let plugins = plugins.unwrap_or_else(|| defaults.plugins().to_vec());

    for (index, plugin) in plugins.iter().enumerate() {
        if plugin.name().trim().is_empty() {
            errors.push(ConfigError::validation(
                format!("plugins[{}]", index),
                "plugin name cannot be empty",
            ));
        }
    }

    plugins
}
