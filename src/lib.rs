//! styleconf library
//!
//! Resolves styling-framework configuration files (content globs, dark mode
//! strategy, theme extensions, plugins) into a validated record for a
//! stylesheet generator. It can be used both as a binary and as a library.

pub mod cli;
pub mod config;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, ConfigLoader, DarkMode, LoadedConfig, RawConfig, ResolveError, ResolvedConfig,
    resolve,
};
