//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Execute the parsed command with merged settings.
///
/// No subcommand means `serve` with default flags.
///
/// # Errors
/// Returns errors from the command handlers.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let command = cli.command.clone().unwrap_or_else(Commands::default_serve);

    match command {
        Commands::Serve { dry_run, .. } => {
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        Commands::Migrate { dry_run, rollback } => {
            if let Some(steps) = rollback
                && steps > 10
            {
                tracing::warn!(steps, "Rolling back a large number of migrations");
            }
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}
