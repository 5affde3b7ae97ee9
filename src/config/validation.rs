//! Configuration validation logic
//!
//! This module provides validation methods for the configuration structures
//! to ensure values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, Settings, UrlShortenerSettings};
use crate::models::ChannelConfig;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl UrlShortenerSettings {
    /// Validate URL shortener settings; nothing is checked while disabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "url_shortener.endpoint".to_string(),
                message: format!(
                    "Invalid shortener endpoint '{}'. Expected an http:// or https:// URL.",
                    self.endpoint
                ),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "url_shortener.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

/// Every enabled channel of an event must name the routine it runs
fn validate_event(key: &str, event: &ChannelConfig) -> Result<(), ConfigError> {
    let required = [
        (event.mail, "mail_options", event.mail_options.routine.as_deref()),
        (
            event.messenger,
            "messenger_options",
            event.messenger_options.routine.as_deref(),
        ),
        (
            event.push || event.push_with_sms_fallback,
            "push_options",
            event.push_options.routine.as_deref(),
        ),
        (event.sms, "sms_options", event.sms_options.routine.as_deref()),
    ];

    for (enabled, options, routine) in required {
        if enabled && routine.is_none_or(|r| r.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                field: format!("events.{}.{}.routine", key, options),
                message: "A routine is required for every enabled channel.".to_string(),
            });
        }
    }

    Ok(())
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered. Events are checked in
    /// key order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.url_shortener.validate()?;

        let mut keys: Vec<_> = self.events.keys().collect();
        keys.sort();
        for key in keys {
            validate_event(key, &self.events[key])?;
        }

        Ok(())
    }
}
