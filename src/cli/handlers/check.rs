//! Check command handler
//!
//! Validates configuration and wires the services once without sending anything.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::state::{AppState, Gateways};

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and build the application state
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Shortener endpoint errors
    pub fn execute(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");
        println!("✓ Logger configuration is valid");
        println!(
            "✓ Phone numbers normalized for locale {} (validation {})",
            self.config.phone.locale.as_str().to_uppercase(),
            if self.config.phone.validate { "on" } else { "off" }
        );

        AppState::from_settings(&self.config, Gateways::dry_run(false))?;
        if self.config.url_shortener.enabled {
            println!("✓ URL shortener at {}", self.config.url_shortener.endpoint);
        }

        println!("✓ {} event(s) configured", self.config.events.len());
        println!("Check completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
