//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{
    CheckCommandHandler, DispatchCommandHandler, DispatchRequest, EventsCommandHandler,
    NormalizeCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Commands::Normalize { raw, .. } => NormalizeCommandHandler::new(settings).execute(raw),
        Commands::Events => EventsCommandHandler::new(settings).execute(),
        Commands::Check => CheckCommandHandler::new(settings).execute(),
        Commands::Dispatch { .. } => {
            let request = dispatch_request(&cli.command).ok_or_else(|| {
                AppError::validation("cli_arguments", "dispatch arguments missing")
            })?;
            DispatchCommandHandler::new(settings)
                .execute(&request)
                .await
        }
    }
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate()
        .map_err(|msg| AppError::validation("cli_arguments", msg))
}

/// Collect the dispatch arguments into a request, `None` for other commands
fn dispatch_request(command: &Commands) -> Option<DispatchRequest> {
    match command {
        Commands::Dispatch {
            event,
            recipient,
            phone,
            push_tokens,
            messenger_reachable,
            messenger_delivers,
            admin,
            enable,
            disable,
            skip_phone_validation,
            log_level: _,
        } => Some(DispatchRequest {
            event: event.clone(),
            recipient_id: *recipient,
            phone: phone.clone(),
            push_tokens: push_tokens.clone(),
            messenger_reachable: *messenger_reachable,
            messenger_delivers: *messenger_delivers,
            admin_id: *admin,
            enable: enable.clone(),
            disable: disable.clone(),
            skip_phone_validation: *skip_phone_validation,
        }),
        _ => None,
    }
}
