//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, settings::Settings};

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments override configuration file values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration.
    ///
    /// A given `config_path` replaces the layered directory; a given
    /// `environment` replaces the one read from `COURIER_APP_ENV`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = config_path {
            Self::validate_config_file_access(path)?;
            loader = loader.with_config_file(path);
        }

        if let Some(env) = environment {
            loader = loader.with_environment(env);
        }

        tracing::debug!(
            environment = %loader.environment(),
            config_dir = %loader.config_dir().display(),
            "Loading configuration"
        );

        Ok(Self::new(loader.load()?))
    }

    /// Validate that the configuration file is accessible and readable
    fn validate_config_file_access(path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!(
                    "Configuration file does not exist or is not a file: '{}'",
                    path.display()
                ),
            });
        }

        std::fs::File::open(path)
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Cannot read configuration file '{}': {}", path.display(), e),
            })
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// 1. CLI arguments have highest priority
    /// 2. Configuration file values are used as base
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);
        self.apply_command_overrides(&mut config, &cli.command);

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Normalize {
                locale: Some(locale),
                ..
            } => {
                config.phone.locale = *locale;
            }
            Commands::Dispatch {
                log_level: Some(level),
                ..
            } => {
                // Command-specific level wins over --verbose/--quiet
                config.logger.level = level.clone().into();
            }
            _ => {}
        }
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use crate::config::loader::tests::{EnvGuard, TEST_MUTEX};
    use crate::utils::PhoneLocale;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_configuration_merger_merge_verbose_flag() {
        let merger = ConfigurationMerger::new(Settings::default());

        let cli = Cli::try_parse_from(["courier-rs", "--verbose", "events"]).unwrap();
        let merged_config = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged_config.logger.level, "debug");
    }

    #[test]
    fn test_configuration_merger_merge_quiet_flag() {
        let merger = ConfigurationMerger::new(Settings::default());

        let cli = Cli::try_parse_from(["courier-rs", "--quiet", "events"]).unwrap();
        let merged_config = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged_config.logger.level, "error");
    }

    #[test]
    fn test_configuration_merger_normalize_locale() {
        let merger = ConfigurationMerger::new(Settings::default());

        let cli = Cli::try_parse_from(["courier-rs", "normalize", "-l", "ch", "079"]).unwrap();
        let merged_config = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged_config.phone.locale, PhoneLocale::Ch);
    }

    #[test]
    fn test_configuration_merger_command_log_level_overrides_global() {
        let merger = ConfigurationMerger::new(Settings::default());

        let cli = Cli::try_parse_from([
            "courier-rs",
            "--verbose",
            "dispatch",
            "--event",
            "welcome",
            "--log-level",
            "warn",
        ])
        .unwrap();
        let merged_config = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged_config.logger.level, "warn");
    }

    #[test]
    fn test_from_config_path_loads_single_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("COURIER_CONFIG_DIR");
        env.remove("COURIER_CONFIG_FILE");
        env.remove("COURIER_APP_ENV");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courier.toml");
        fs::write(
            &path,
            r#"
[phone]
locale = "at"
"#,
        )
        .unwrap();

        let merger =
            ConfigurationMerger::from_config_path(Some(path.as_path()), Some(Environment::Test)).unwrap();
        assert_eq!(merger.config().phone.locale, PhoneLocale::At);
    }

    #[test]
    fn test_from_config_path_missing_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("COURIER_CONFIG_DIR");
        env.remove("COURIER_CONFIG_FILE");

        let result =
            ConfigurationMerger::from_config_path(Some(Path::new("/nonexistent.toml")), None);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "config_file"
        ));
    }
}
