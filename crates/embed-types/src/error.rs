//! Error types for configuration loading.

use thiserror::Error;

/// Errors raised while building or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(String),

    /// A value was read but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
