//! Configuration error types

use thiserror::Error;

/// Failures while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A settings value is out of range or inconsistent
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `events.offer_generated.push_options.routine`
        field: String,
        message: String,
    },

    /// Unparsable `COURIER_APP_ENV` or similar
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `COURIER_CONFIG_DIR` and `COURIER_CONFIG_FILE` set together
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
