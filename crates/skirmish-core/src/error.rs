//! Error types for configuration and parsing.

use thiserror::Error;

/// A patrol pattern name that matches none of the known curves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown patrol pattern: {0:?}")]
pub struct UnknownPattern(pub String);

/// Errors raised while loading or validating a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A numeric tunable is outside its allowed range
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
