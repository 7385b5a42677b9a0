//! Command-line interface
//!
//! Argument parsing, merging CLI overrides into loaded configuration, and
//! dispatching to the serve and migrate handlers.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::{ConfigError, Settings};
use crate::logger::{LoggerError, init_logger};

/// Loads configuration for `cli` and applies its overrides.
///
/// # Errors
/// Returns error if loading, merging or validation fails
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}

/// Installs the global tracing subscriber described by `settings.logger`.
///
/// # Errors
/// Returns error if the logger configuration is invalid or a subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> Result<(), LoggerError> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    init_logger(logger_config)
}
