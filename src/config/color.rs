//! Color token values
//!
//! Theme colors are stored as validated hex strings. The original spelling is
//! kept so that a resolved config serializes back to exactly what the user wrote.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// `#rgb` or `#rrggbb`, case-insensitive
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
});

/// Shade key that maps onto the bare color name
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// Check whether a string is a `#rgb` / `#rrggbb` hex color
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// A validated hex color string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Validate a raw value, returning a user-facing message on failure
    pub fn parse(value: &str) -> Result<Self, String> {
        if is_hex_color(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(format!(
                "'{}' is not a hex color (expected #rgb or #rrggbb)",
                value
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        csscolorparser::parse(&self.0).ok().map(|color| {
            let [r, g, b, _] = color.to_rgba8();
            [r, g, b]
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A named color in a resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorToken {
    pub name: String,
    pub value: HexColor,
}

/// A color as written in a config file
///
/// Either a single value or a map of shades:
///
/// ```yaml
/// brand: "#0af"
/// gray:
///   DEFAULT: "#6b7280"
///   100: "#f3f4f6"
/// ```
///
/// Anything else (numbers, booleans, lists, unquoted `000000`) is kept as
/// `Other` so the resolver can report it against the token name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    Shades(BTreeMap<String, String>),
    Other(serde_yaml::Value),
}

/// One flattened color leaf: the token name and its string value,
/// or a message describing why the leaf is not a string
pub type ColorLeaf = (String, Result<String, String>);

impl ColorValue {
    /// Expand into `(token name, raw value)` pairs
    ///
    /// Shades become `<name>-<shade>`, the `DEFAULT` shade becomes `<name>`.
    pub fn flatten(&self, name: &str) -> Vec<ColorLeaf> {
        match self {
            Self::Single(value) => vec![(name.to_string(), Ok(value.clone()))],
            Self::Shades(shades) => shades
                .iter()
                .map(|(shade, value)| (shade_token(name, shade), Ok(value.clone())))
                .collect(),
            Self::Other(serde_yaml::Value::Mapping(shades)) => shades
                .iter()
                .map(|(shade, value)| match scalar_text(shade) {
                    Some(shade) => (shade_token(name, &shade), leaf_text(value)),
                    None => (
                        name.to_string(),
                        Err(format!("shade name {} must be a string", describe(shade))),
                    ),
                })
                .collect(),
            Self::Other(value) => vec![(name.to_string(), leaf_text(value))],
        }
    }
}

fn shade_token(name: &str, shade: &str) -> String {
    if shade == DEFAULT_SHADE {
        name.to_string()
    } else {
        format!("{}-{}", name, shade)
    }
}

/// Strings and numbers are accepted as shade names (`100:` parses as a number)
fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn leaf_text(value: &serde_yaml::Value) -> Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        other => Err(format!(
            "expected a quoted hex color string, found {}",
            describe(other)
        )),
    }
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => format!("boolean {}", b),
        serde_yaml::Value::Number(n) => format!("number {}", n),
        serde_yaml::Value::String(s) => format!("'{}'", s),
        serde_yaml::Value::Sequence(_) => "a list".to_string(),
        serde_yaml::Value::Mapping(_) => "a map".to_string(),
        serde_yaml::Value::Tagged(_) => "a tagged value".to_string(),
    }
}

impl From<&HexColor> for ColorValue {
    fn from(color: &HexColor) -> Self {
        Self::Single(color.as_str().to_string())
    }
}
