//! Normalize command handler

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::utils::PhoneNumber;

/// Handler for the normalize command
pub struct NormalizeCommandHandler {
    config: Settings,
}

impl NormalizeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Normalize `raw` for the configured locale and print the result.
    ///
    /// # Errors
    /// `AppError::Validation` when validation is enabled and the number is not
    /// a mobile number of the locale.
    pub fn execute(&self, raw: &str) -> AppResult<()> {
        let number = self.normalize(raw);
        println!("{}", number);

        if number.is_valid() {
            println!("✓ Valid {} mobile number", number.locale().as_str().to_uppercase());
            return Ok(());
        }

        // Repeats the check so the error carries the validator's message
        self.config.phone.validator().mobile(raw, None).map(|_| {
            println!(
                "✗ Not a {} mobile number (validation disabled)",
                number.locale().as_str().to_uppercase()
            );
        })
    }

    pub fn normalize(&self, raw: &str) -> PhoneNumber {
        self.config.phone.validator().normalize(raw)
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
