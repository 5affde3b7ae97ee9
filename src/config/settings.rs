//! Configuration settings structures for courier-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::external::ContentTemplate;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::models::ChannelConfig;
use crate::utils::{PhoneLocale, PhoneValidator};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "courier-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/courier.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_shortener_timeout() -> u64 {
    5
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Colors are only used when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Phone Configuration
// ============================================================================

/// Phone number normalization and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneSettings {
    /// Locale scoping mobile validation; also supplies the default country code
    #[serde(default)]
    pub locale: PhoneLocale,

    /// Reject numbers that are not valid mobile numbers of `locale`
    #[serde(default = "default_true")]
    pub validate: bool,
}

impl Default for PhoneSettings {
    fn default() -> Self {
        Self {
            locale: PhoneLocale::default(),
            validate: default_true(),
        }
    }
}

impl PhoneSettings {
    pub fn validator(&self) -> PhoneValidator {
        PhoneValidator::new(self.locale, self.validate)
    }
}

// ============================================================================
// URL Shortener Configuration
// ============================================================================

/// URL shortener used for deep links appended to fallback SMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlShortenerSettings {
    /// When disabled deep links are used as they are
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_shortener_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UrlShortenerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            timeout_seconds: default_shortener_timeout(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub phone: PhoneSettings,

    #[serde(default)]
    pub url_shortener: UrlShortenerSettings,

    /// Feature flags by name
    #[serde(default)]
    pub features: HashMap<String, bool>,

    /// Channel configuration by event key
    #[serde(default)]
    pub events: HashMap<String, ChannelConfig>,

    /// Content templates by content method
    #[serde(default)]
    pub content: HashMap<String, ContentTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_application_config() -> impl Strategy<Value = ApplicationConfig> {
        (
            "[a-z][a-z0-9-]{0,20}",
            "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        )
            .prop_map(|(name, version)| ApplicationConfig { name, version })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            prop_oneof![
                Just("json".to_string()),
                Just("full".to_string()),
                Just("compact".to_string()),
            ],
        )
            .prop_map(|(level, console, colored, file, format)| LoggerSettings {
                level,
                console: ConsoleSettings {
                    enabled: console,
                    colored,
                },
                file: FileSettings {
                    enabled: file,
                    format,
                    ..Default::default()
                },
            })
    }

    fn arb_phone_settings() -> impl Strategy<Value = PhoneSettings> {
        (
            prop_oneof![
                Just(PhoneLocale::De),
                Just(PhoneLocale::At),
                Just(PhoneLocale::Ch),
            ],
            any::<bool>(),
        )
            .prop_map(|(locale, validate)| PhoneSettings { locale, validate })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_application_config(),
            arb_logger_settings(),
            arb_phone_settings(),
            proptest::collection::hash_map("[a-z_]{3,12}", any::<bool>(), 0..4),
        )
            .prop_map(|(application, logger, phone, features)| Settings {
                application,
                logger,
                phone,
                features,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }
    }

    // ========================================================================
    // Unit tests
    // ========================================================================

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "courier-rs");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_phone_settings_defaults() {
        let phone = PhoneSettings::default();
        assert_eq!(phone.locale, PhoneLocale::De);
        assert!(phone.validate);
        assert_eq!(phone.validator(), PhoneValidator::default());
    }

    #[test]
    fn test_url_shortener_defaults() {
        let shortener = UrlShortenerSettings::default();
        assert!(!shortener.enabled);
        assert_eq!(shortener.timeout_seconds, 5);
    }

    #[test]
    fn test_logger_settings_conversion() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            file: FileSettings {
                enabled: true,
                format: "compact".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/courier.log"));
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        match settings.into_logger_config() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "logger.file.format")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
[phone]
locale = "at"

[features]
sms_messaging = true

[events.offer_generated]
push_with_sms_fallback = true
push_options = { routine = "offer_generated" }
sms_options = { routine = "offer_generated", validate_phone = false }

[content.offer_generated]
title = "New offer"
body = "Your offer {0} is ready"
deep_link = "https://app.example.com/offers/{0}"
"#,
        )
        .unwrap();

        assert_eq!(settings.phone.locale, PhoneLocale::At);
        assert!(settings.phone.validate);
        assert_eq!(settings.features.get("sms_messaging"), Some(&true));

        let event = &settings.events["offer_generated"];
        assert!(event.push_with_sms_fallback);
        assert!(!event.push);
        assert_eq!(event.push_options.routine.as_deref(), Some("offer_generated"));
        assert!(!event.sms_options.validate_phone);

        assert_eq!(settings.content["offer_generated"].title, "New offer");
    }
}
