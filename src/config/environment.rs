//! Deployment environment selecting the `{env}.toml` overlay

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

/// Accepted spellings, canonical name first
const ALIASES: [(Environment, &[&str]); 4] = [
    (Environment::Development, &["development", "dev"]),
    (Environment::Test, &["test"]),
    (Environment::Staging, &["staging", "stage"]),
    (Environment::Production, &["production", "prod"]),
];

impl Environment {
    pub const ENV_VAR: &'static str = "COURIER_APP_ENV";

    /// Environment from `COURIER_APP_ENV`, `Development` when unset.
    ///
    /// An unrecognized value also yields `Development`, with a warning.
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };

        raw.parse().unwrap_or_else(|e: ConfigError| {
            tracing::warn!(error = %e, "Ignoring {}", Self::ENV_VAR);
            Self::default()
        })
    }

    pub fn as_str(&self) -> &'static str {
        ALIASES
            .iter()
            .find(|(env, _)| env == self)
            .map(|(_, names)| names[0])
            .unwrap_or("development")
    }

    /// Name of the optional overlay file loaded after `default.toml`
    pub fn overlay_file_name(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        ALIASES
            .iter()
            .find(|(_, names)| names.contains(&wanted.as_str()))
            .map(|(env, _)| *env)
            .ok_or_else(|| {
                ConfigError::EnvVarError(format!(
                    "Invalid environment '{}'. Valid values are: development, test, staging, production",
                    s
                ))
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
