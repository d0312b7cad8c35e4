//! Range and format checks run after configuration is deserialized.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, PaginationConfig, RewardsConfig, ServerConfig,
    Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound for `pagination.max_page_size`
const PAGE_SIZE_CEILING: u32 = 500;

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        if let Some(origin) = self
            .cors_allowed_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::validation(
                "server.cors_allowed_origins",
                format!("Origin '{origin}' must start with http:// or https://"),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required.",
            ));
        }

        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(ConfigError::validation(
                "database.url",
                "Expected format: postgres://[user:password@]host[:port]/database",
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

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console or logger.file must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl RewardsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("rewards.signup_bonus", self.signup_bonus),
            ("rewards.referral_bonus", self.referral_bonus),
            ("rewards.referred_bonus", self.referred_bonus),
        ] {
            if value < 0 {
                return Err(ConfigError::validation(
                    field,
                    format!("Reward amount cannot be negative (got {value})."),
                ));
            }
        }
        Ok(())
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 || self.max_page_size > PAGE_SIZE_CEILING {
            return Err(ConfigError::validation(
                "pagination.max_page_size",
                format!("Max page size must be between 1 and {PAGE_SIZE_CEILING}."),
            ));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::validation(
                "pagination.default_page_size",
                format!(
                    "Default page size must be between 1 and max_page_size ({}).",
                    self.max_page_size
                ),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Returns the first validation error found. JWT settings are checked
    /// separately when the server starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.rewards.validate()?;
        self.pagination.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> String {
        err.key().to_string()
    }

    #[test]
    fn test_server_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_server_timeouts() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.request_timeout"
        );

        let config = ServerConfig {
            keep_alive_timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.keep_alive_timeout"
        );
    }

    #[test]
    fn test_server_cors_origin_scheme() {
        let config = ServerConfig {
            cors_allowed_origins: vec!["https://app.example.com".into(), "example.com".into()],
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "server.cors_allowed_origins"
        );
    }

    #[test]
    fn test_database_url_rules() {
        assert_eq!(
            field_of(DatabaseConfig::default().validate().unwrap_err()),
            "database.url"
        );

        let config = DatabaseConfig {
            url: "sqlite://db.sqlite".into(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "database.url");

        for url in ["postgres://localhost/db", "postgresql://u:p@db:5432/app"] {
            let config = DatabaseConfig {
                url: url.into(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn test_database_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/db".into(),
            min_connections: 10,
            max_connections: 5,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "database.min_connections"
        );
    }

    #[test]
    fn test_logger_levels() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            let settings = LoggerSettings {
                level: level.into(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "{level} should be accepted");
        }

        let settings = LoggerSettings {
            level: "verbose".into(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_needs_an_output() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");

        settings.file.enabled = true;
        settings.file.path = "  ".into();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.path"
        );
    }

    #[test]
    fn test_rewards_non_negative() {
        assert!(RewardsConfig::default().validate().is_ok());

        let rewards = RewardsConfig {
            referral_bonus: -1,
            ..Default::default()
        };
        assert_eq!(
            field_of(rewards.validate().unwrap_err()),
            "rewards.referral_bonus"
        );

        let rewards = RewardsConfig {
            signup_bonus: 0,
            referral_bonus: 0,
            referred_bonus: 0,
        };
        assert!(rewards.validate().is_ok());
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(PaginationConfig::default().validate().is_ok());

        let config = PaginationConfig {
            default_page_size: 50,
            max_page_size: 20,
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "pagination.default_page_size"
        );

        let config = PaginationConfig {
            default_page_size: 20,
            max_page_size: 1000,
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "pagination.max_page_size"
        );
    }

    #[test]
    fn test_settings_validate_reports_first_error() {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/db".into();
        assert!(settings.validate().is_ok());

        settings.pagination.default_page_size = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "pagination.default_page_size"
        );
    }
}
