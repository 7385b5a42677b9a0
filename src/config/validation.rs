//! Configuration validation logic
//!
//! Each section validates itself and reports the first offending field as
//! `ConfigError::ValidationError`.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings};
use crate::logger::VALID_LOG_LEVELS;

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must point at SQLite
    /// - `0 < min_connections <= max_connections`
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a SQLite database path.",
            ));
        }

        if !self.is_sqlite_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected sqlite://path, sqlite:path or a file path",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    /// `sqlite://` and `sqlite:` prefixes are accepted, as is any path that
    /// does not carry some other URL scheme.
    fn is_sqlite_url(&self) -> bool {
        let url = self.url.trim();
        if url.starts_with("sqlite:") {
            return true;
        }
        !url.contains("://")
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates every section and returns the first error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "server.port");
    }

    #[test]
    fn test_server_config_port_boundaries() {
        for port in [1, 65535] {
            let config = ServerConfig {
                port,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_server_config_request_timeout_zero() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "server.request_timeout");
    }

    #[test]
    fn test_database_url_forms() {
        for url in [
            "sqlite://grocery.db",
            "sqlite:grocery.db",
            "sqlite::memory:",
            "./data/grocery.db",
            "/var/lib/grocery.db",
        ] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{} should be accepted", url);
        }
    }

    #[test]
    fn test_database_url_rejected() {
        for url in ["", "   ", "postgres://localhost/grocery", "mysql://host/db"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert_field(config.validate(), "database.url");
        }
    }

    #[test]
    fn test_database_pool_bounds() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "database.max_connections");

        let config = DatabaseConfig {
            min_connections: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "database.min_connections");

        let config = DatabaseConfig {
            min_connections: 6,
            max_connections: 5,
            ..Default::default()
        };
        assert_field(config.validate(), "database.min_connections");

        let config = DatabaseConfig {
            min_connections: 5,
            max_connections: 5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_connection_timeout_zero() {
        let config = DatabaseConfig {
            connection_timeout: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "database.connection_timeout");
    }

    #[test]
    fn test_logger_level_and_format() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.level");

        let settings = LoggerSettings {
            level: "WARN".to_string(),
            file: FileSettings {
                format: "yaml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.file.format");
    }

    #[test]
    fn test_logger_file_path_required_when_enabled() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: " ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.file.path");
    }

    #[test]
    fn test_settings_reports_first_failing_section() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.database.url = String::new();
        assert_field(settings.validate(), "server.port");
    }
}
