//! Configuration errors
//!
//! Resolution never stops at the first problem. Every [`ConfigError`] found in
//! one pass is collected into a [`ResolveError`] so the user can fix them all at once.

/// A single problem found while resolving a configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A field is present but malformed
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// A required field has no value even after defaults were applied
    #[error("Missing required field '{field}': {message}")]
    MissingRequiredField { field: String, message: String },
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the offending field (e.g. `theme.extend.colors.bad`)
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } | Self::MissingRequiredField { field, .. } => field,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Every problem found in one resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_errors(.errors))]
pub struct ResolveError {
    errors: Vec<ConfigError>,
}

impl ResolveError {
    /// Wrap collected errors. Returns `None` when nothing went wrong.
    pub fn from_errors(errors: Vec<ConfigError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Find the error reported for a given field, if any
    pub fn for_field(&self, field: &str) -> Option<&ConfigError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

fn render_errors(errors: &[ConfigError]) -> String {
    let mut out = format!("Configuration has {} problem(s):", errors.len());
    for error in errors {
        out.push_str("\n  - ");
        out.push_str(&error.to_string());
    }
    out
}
