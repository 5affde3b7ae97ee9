use thiserror::Error;

use crate::config::error::ConfigError;

/// Crate-wide error type for notification dispatch.
///
/// The variants mirror how a failure is allowed to travel: configuration and
/// validation errors always reach the caller of `dispatch`, gateway errors are
/// either propagated or absorbed depending on the channel path that produced them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Event key or channel option bundle cannot be resolved
    #[error("Configuration error for {key}: {reason}")]
    Configuration { key: String, reason: String },

    /// Input rejected before any network I/O took place
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// An external channel client raised
    #[error("Gateway error on {channel} channel: {source}")]
    Gateway {
        channel: String,
        #[source]
        source: anyhow::Error,
    },

    /// A channel was deliberately not used
    #[error("{channel} delivery suppressed: {reason}")]
    Suppressed { channel: String, reason: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Error raised when an event key has no stored channel configuration
    pub fn unknown_event(key: impl Into<String>) -> Self {
        AppError::Configuration {
            key: key.into(),
            reason: "no settings associated to such key".to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn gateway(channel: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Gateway {
            channel: channel.into(),
            source: source.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Configuration { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, AppError::Gateway { .. })
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => AppError::Configuration {
                key: field,
                reason: message,
            },
            other => AppError::Configuration {
                key: "settings".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field; payload structs only carry a handful of rules
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.into_iter().next() {
            Some((field, field_errors)) => {
                let reason = field_errors
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "invalid value".to_string());
                AppError::Validation {
                    field: field.to_string(),
                    reason,
                }
            }
            None => AppError::Validation {
                field: "payload".to_string(),
                reason: errors.to_string(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
