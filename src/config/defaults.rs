//! Default configuration values
//!
//! Provides the built-in resolved configuration that user configs are layered on.

use super::color::HexColor;
use super::schema::{DarkMode, ResolvedConfig, ResolvedTheme};
use std::collections::BTreeMap;

/// Globs scanned when the user configures none
pub const DEFAULT_CONTENT: &[&str] = &["./index.html", "./src/**/*.{vue,js,ts,jsx,tsx}"];

/// Base palette
pub const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("gray-100", "#f3f4f6"),
    ("gray-500", "#6b7280"),
    ("gray-900", "#111827"),
    ("red-500", "#ef4444"),
    ("green-500", "#22c55e"),
    ("blue-500", "#3b82f6"),
];

/// Get the built-in default configuration
pub fn default_config() -> ResolvedConfig {
    let colors = DEFAULT_COLORS
        .iter()
        .filter_map(|(name, value)| {
            HexColor::parse(value)
                .ok()
                .map(|color| (name.to_string(), color))
        })
        .collect::<BTreeMap<_, _>>();

    ResolvedConfig::new(
        DEFAULT_CONTENT.iter().map(|s| s.to_string()).collect(),
        DarkMode::Media,
        ResolvedTheme::new(colors, BTreeMap::new()),
        Vec::new(),
    )
}
