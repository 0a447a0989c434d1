//! Error types for configuration loading
//!
//! None of these ever reach a caller of the public API: the resolver logs
//! them and falls back to an empty configuration.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The request could not be issued or did not complete
    #[error("config fetch failed: {0}")]
    Fetch(String),

    /// The server answered with a non-success status
    #[error("config not found (HTTP {0})")]
    Status(u16),

    /// The body was not valid JSON
    #[error("config is not valid JSON: {0}")]
    Parse(String),

    /// The document is not a JSON object
    #[error("config document is not an object")]
    NotAnObject,

    /// The document has no `targets` mapping
    #[error("config document has no 'targets' mapping")]
    MissingTargets,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
