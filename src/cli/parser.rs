//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

use crate::build;
use crate::models::Channel;
use crate::utils::PhoneLocale;

/// Notification dispatch for customer events
#[derive(Parser, Debug)]
#[command(name = "courier-rs")]
#[command(about = "Notification dispatch for customer events")]
#[command(long_about = "
Courier-rs routes customer events to mail, messenger, push and SMS according
to per-event channel configuration, falling back from push to SMS when a push
cannot be delivered.

EXAMPLES:
    # Normalize and validate a phone number
    courier-rs normalize \"0171 1234567\"

    # Validate a number against the Austrian mobile ranges
    courier-rs normalize --locale at \"0664 1234567\"

    # List configured events and their channels
    courier-rs events

    # Validate configuration and exit
    courier-rs --config /path/to/config.toml check

    # Dispatch an event through logging gateways
    courier-rs dispatch --event offer_generated --phone 01711234567 --push-token abc

For more information about configuration options, see config/default.toml.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/courier-rs/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    ///
    /// Available values: development (dev), staging (stage), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a phone number and check it against a locale
    ///
    /// Examples:
    ///   courier-rs normalize "+49 171 1234567"
    ///   courier-rs normalize --locale ch "079 123 45 67"
    Normalize {
        /// Raw phone number as entered by a customer
        #[arg(value_name = "NUMBER")]
        raw: String,

        /// Locale to normalize and validate for; defaults to `phone.locale`
        #[arg(short, long, value_parser = super::validation::validate_locale)]
        locale: Option<PhoneLocale>,
    },

    /// List configured events and their enabled channels
    Events,

    /// Validate configuration and exit
    ///
    /// Returns exit code 0 if valid, non-zero if invalid.
    Check,

    /// Dispatch an event to a recipient through logging gateways
    ///
    /// No message leaves the process; every gateway logs what it would send.
    ///
    /// Examples:
    ///   courier-rs dispatch --event welcome --phone 01711234567
    ///   courier-rs dispatch --event offer_generated --push-token abc --disable push
    Dispatch {
        /// Event key to dispatch
        #[arg(long, value_name = "KEY", value_parser = super::validation::validate_event_key)]
        event: String,

        /// Recipient id; a random one is generated when omitted
        #[arg(long, value_name = "UUID")]
        recipient: Option<Uuid>,

        /// Recipient phone number
        #[arg(long, value_name = "NUMBER")]
        phone: Option<String>,

        /// Push token of a recipient device; repeat for several devices
        #[arg(long = "push-token", value_name = "TOKEN", value_parser = super::validation::validate_push_token)]
        push_tokens: Vec<String>,

        /// The recipient can be reached by messenger
        #[arg(long)]
        messenger_reachable: bool,

        /// The messenger reports messages as delivered
        #[arg(long, requires = "messenger_reachable")]
        messenger_delivers: bool,

        /// Admin triggering the event
        #[arg(long, value_name = "UUID")]
        admin: Option<Uuid>,

        /// Enable a channel for this dispatch only
        #[arg(long, value_enum, value_name = "CHANNEL")]
        enable: Vec<ChannelArg>,

        /// Disable a channel for this dispatch only
        #[arg(long, value_enum, value_name = "CHANNEL")]
        disable: Vec<ChannelArg>,

        /// Send SMS without validating the phone number
        #[arg(long)]
        skip_phone_validation: bool,

        /// Log level override
        ///
        /// Overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },
}

/// Channels that can be toggled per dispatch
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelArg {
    #[value(name = "mail")]
    Mail,
    #[value(name = "messenger")]
    Messenger,
    #[value(name = "push")]
    Push,
    #[value(name = "sms")]
    Sms,
    #[value(name = "push-with-sms-fallback", alias = "fallback")]
    PushWithSmsFallback,
}

impl ChannelArg {
    /// The plain channel, `None` for the fallback pair
    pub fn channel(self) -> Option<Channel> {
        match self {
            ChannelArg::Mail => Some(Channel::Mail),
            ChannelArg::Messenger => Some(Channel::Messenger),
            ChannelArg::Push => Some(Channel::Push),
            ChannelArg::Sms => Some(Channel::Sms),
            ChannelArg::PushWithSmsFallback => None,
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Commands::Dispatch {
            enable, disable, ..
        } = &self.command
            && let Some(both) = enable.iter().find(|c| disable.contains(c))
        {
            return Err(format!(
                "Channel '{:?}' cannot be both enabled and disabled",
                both
            ));
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
