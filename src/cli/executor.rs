//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::config::error::ConfigError;
use crate::error::AppResult;

/// What `main` should do once a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Run the HTTP server with the merged settings.
    StartServer,
    /// The command finished on its own; exit.
    Exit,
}

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns argument validation errors and errors from command handlers
pub fn execute_command(cli: &Cli, settings: Settings) -> AppResult<CommandOutcome> {
    cli.validate()
        .map_err(|reason| ConfigError::validation("cli_arguments", reason))?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).validate_only()?;
            Ok(CommandOutcome::Exit)
        }
        Some(Commands::Serve { .. }) | None => Ok(CommandOutcome::StartServer),
    }
}
