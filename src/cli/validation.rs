//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

use crate::utils::PhoneLocale;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate an event key: non-empty, no whitespace
pub fn validate_event_key(key_str: &str) -> Result<String, String> {
    let key = key_str.trim();

    if key.is_empty() {
        return Err("Event key cannot be empty".to_string());
    }

    if key.chars().any(char::is_whitespace) {
        return Err(format!("Event key cannot contain whitespace: '{}'", key_str));
    }

    Ok(key.to_string())
}

/// Validate a push token is not blank
pub fn validate_push_token(token_str: &str) -> Result<String, String> {
    let token = token_str.trim();

    if token.is_empty() {
        return Err("Push token cannot be empty".to_string());
    }

    Ok(token.to_string())
}

/// Parse a phone locale (`de`, `at`, `ch`)
pub fn validate_locale(locale_str: &str) -> Result<PhoneLocale, String> {
    locale_str.parse::<PhoneLocale>().map_err(|e| e.to_string())
}
