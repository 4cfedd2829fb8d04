//! Configuration schema definitions
//!
//! [`RawConfig`] mirrors what users write in `styleconf.config.yaml`. Every field
//! is optional. [`ResolvedConfig`] is the fully defaulted, validated result that
//! the stylesheet generator consumes. It can only be built by the resolver.

use super::color::{ColorToken, ColorValue, HexColor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root configuration structure, as written by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfig {
    /// Glob patterns selecting the files scanned for class usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,

    /// Dark mode strategy ("media" or "class"), validated during resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<RawTheme>,

    /// Plugins, in application order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginDescriptor>>,
}

/// Theme section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTheme {
    /// Replaces the default palette wholesale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, ColorValue>>,

    /// Additive overrides layered over the defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend: Option<ThemeExtend>,
}

/// `theme.extend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeExtend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, ColorValue>>,

    /// Any other theme key (spacing, fontFamily, ...). Passed through opaquely.
    #[serde(flatten)]
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// A plugin entry: either a bare name or a name with options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginDescriptor {
    Name(String),
    Configured {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<serde_json::Value>,
    },
}

impl PluginDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Configured { name, .. } => name,
        }
    }
}

/// How the stylesheet decides when to apply dark-theme rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// `prefers-color-scheme` media query
    #[default]
    Media,
    /// Explicit `.dark` class toggle
    Class,
}

impl DarkMode {
    pub const ALL: [DarkMode; 2] = [DarkMode::Media, DarkMode::Class];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DarkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "media" => Ok(Self::Media),
            "class" => Ok(Self::Class),
            other => Err(format!(
                "'{}' is not a dark mode strategy (expected one of: {})",
                other,
                DarkMode::ALL.map(DarkMode::as_str).join(", ")
            )),
        }
    }
}

/// Fully defaulted, validated configuration
///
/// Invariants: `content` is non-empty, every color is a valid hex color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    content: Vec<String>,
    dark_mode: DarkMode,
    theme: ResolvedTheme,
    plugins: Vec<PluginDescriptor>,
}

/// Resolved theme tokens
///
/// Serializes in the `RawTheme` shape (`colors` plus `extend.<section>`) so
/// that printed output can be loaded again as a config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTheme {
    colors: BTreeMap<String, HexColor>,
    sections: BTreeMap<String, serde_json::Value>,
}

impl ResolvedConfig {
    /// Only the resolver and the built-in defaults construct resolved configs
    pub(super) fn new(
        content: Vec<String>,
        dark_mode: DarkMode,
        theme: ResolvedTheme,
        plugins: Vec<PluginDescriptor>,
    ) -> Self {
        Self {
            content,
            dark_mode,
            theme,
            plugins,
        }
    }

    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn dark_mode(&self) -> DarkMode {
        self.dark_mode
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    pub fn colors(&self) -> &BTreeMap<String, HexColor> {
        &self.theme.colors
    }

    /// Look up a color by token name
    pub fn color(&self, name: &str) -> Option<&str> {
        self.theme.colors.get(name).map(HexColor::as_str)
    }

    /// All color tokens, sorted by name
    pub fn color_tokens(&self) -> Vec<ColorToken> {
        self.theme
            .colors
            .iter()
            .map(|(name, value)| ColorToken {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    /// Convert back to a raw config that resolves to this exact record
    ///
    /// Colors go into `theme.colors` so they replace, rather than extend,
    /// whatever defaults the round trip is resolved against.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            content: Some(self.content.clone()),
            dark_mode: Some(self.dark_mode.as_str().to_string()),
            theme: Some(RawTheme::from(&self.theme)),
            plugins: Some(self.plugins.clone()),
        }
    }
}

impl From<&ResolvedTheme> for RawTheme {
    fn from(theme: &ResolvedTheme) -> Self {
        let colors = theme
            .colors
            .iter()
            .map(|(name, value)| (name.clone(), ColorValue::from(value)))
            .collect();

        let extend = if theme.sections.is_empty() {
            None
        } else {
            Some(ThemeExtend {
                colors: None,
                sections: theme.sections.clone(),
            })
        };

        RawTheme {
            colors: Some(colors),
            extend,
        }
    }
}

impl Serialize for ResolvedTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawTheme::from(self).serialize(serializer)
    }
}

impl ResolvedTheme {
    pub(super) fn new(
        colors: BTreeMap<String, HexColor>,
        sections: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self { colors, sections }
    }

    pub fn colors(&self) -> &BTreeMap<String, HexColor> {
        &self.colors
    }

    /// Non-color theme sections (spacing, fontFamily, ...)
    pub fn sections(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&serde_json::Value> {
        self.sections.get(name)
    }
}
