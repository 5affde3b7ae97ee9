//! Configuration types for the logger

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use super::error::LoggerError;

/// Level applied to dependencies (HTTP client, config loader) regardless of `level`
const DEPENDENCY_LEVEL: &str = "warn";

const VALID_LEVELS: &str = "trace, debug, info, warn, error";

/// Runtime logger configuration, built from `[logger]` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Level of this crate's own events
    pub level: String,
}

impl LoggerConfig {
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> Result<Self, LoggerError> {
        let config = Self { console, file, level };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }
        Ok(())
    }

    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        Level::from_str(self.level.trim()).map_err(|_| {
            LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level, VALID_LEVELS
            ))
        })
    }

    /// `EnvFilter` directive: dependencies at warn, `courier_rs` at the configured level.
    ///
    /// Dispatch decisions are logged at debug, so `--verbose` shows them
    /// without flooding the output with connection-pool chatter.
    pub fn filter_directive(&self) -> Result<String, LoggerError> {
        let level = self.parse_level()?.as_str().to_lowercase();
        Ok(format!("{},courier_rs={}", DEPENDENCY_LEVEL, level))
    }

    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output; colors only apply when stdout is a terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// Keep existing content instead of truncating on start
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(
        enabled: bool,
        path: PathBuf,
        append: bool,
        format: LogFormat,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            enabled,
            path,
            append,
            format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Does not touch the filesystem; the writer creates missing directories.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.enabled && self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/courier.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LogFormat::Full, LogFormat::Compact, LogFormat::Json]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                LoggerError::config(format!(
                    "Invalid log format '{}'. Valid formats are: full, compact, json",
                    s
                ))
            })
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
