//! Configuration merging
//!
//! Layers CLI overrides on top of the settings produced by `ConfigLoader`.
//! Precedence, highest first: command flags, global flags, environment
//! variables, configuration files.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Settings};

/// Merges CLI arguments into loaded settings
#[derive(Debug, Clone)]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base settings the way the CLI asks for them.
    ///
    /// `--config` selects a single file and `--env` overrides
    /// `GROCERY_APP_ENV`. Without either, the usual layered lookup applies.
    ///
    /// # Errors
    ///
    /// Any loading or validation error from `ConfigLoader`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        tracing::debug!(
            environment = %loader.environment(),
            config_file = ?loader.config_file(),
            "Loading configuration"
        );

        Ok(Self::new(loader.load()?))
    }

    /// Applies CLI overrides and validates the result.
    ///
    /// `--verbose` sets the level to `debug` and `--quiet` to `error`;
    /// `serve --log-level` wins over both.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_base_config() {
        let merged = merge(&["grocery-store-api"]);
        assert_eq!(merged, Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["grocery-store-api", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["grocery-store-api", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let merged = merge(&["grocery-store-api", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
        assert_eq!(merged.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["grocery-store-api", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_ignores_serve_overrides() {
        let merged = merge(&["grocery-store-api", "migrate", "--dry-run"]);
        assert_eq!(merged.server, Settings::default().server);
    }

    #[test]
    fn test_invalid_base_config_fails_validation() {
        let mut base = Settings::default();
        base.database.url = String::new();
        let cli = Cli::try_parse_from(["grocery-store-api"]).unwrap();

        let result = ConfigurationMerger::new(base).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
