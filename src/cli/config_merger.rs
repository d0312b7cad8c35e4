//! Applies CLI overrides on top of file and environment configuration.
//!
//! Precedence, highest first: command flags (`serve --log-level`), global
//! flags (`--verbose`/`--quiet`), `CREATORHUB_*` variables, TOML files.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration named by `--config` and `--env`.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        tracing::debug!(environment = %loader.environment(), "Loading configuration");
        Ok(Self::new(loader.load()?))
    }

    /// Returns a validated copy of the base configuration with overrides applied.
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
                config.server.host = host.clone();
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

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/creatorhub_test".to_string();
        ConfigurationMerger::new(config)
    }

    fn merged(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli).unwrap()
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let settings = merged(&["creatorhub"]);
        assert_eq!(&settings, merger().config());
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merged(&["creatorhub", "--verbose"]).logger.level, "debug");
        assert_eq!(merged(&["creatorhub", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let settings = merged(&["creatorhub", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_beats_global_flag() {
        let settings = merged(&["creatorhub", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let cli = Cli::try_parse_from(["creatorhub"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creatorhub.toml");
        std::fs::write(
            &path,
            r#"
            [database]
            url = "postgres://localhost/from_file"

            [rewards]
            referred_bonus = 40
            "#,
        )
        .unwrap();

        let cli = Cli::try_parse_from(["creatorhub", "--config", path.to_str().unwrap()]).unwrap();
        let merger = ConfigurationMerger::load(&cli).unwrap();
        assert_eq!(merger.config().database.url, "postgres://localhost/from_file");
        assert_eq!(merger.config().rewards.referred_bonus, 40);
    }
}
