//! Merges CLI overrides into file-based configuration.
//!
//! Precedence, lowest first: config files, `FLATVIEW_*` environment
//! variables, global flags (`--verbose`/`--quiet`), then subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Applies CLI argument overrides on top of a loaded configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration the CLI points at.
    ///
    /// `--config` replaces the layered directory with a single file and
    /// `--env` picks the environment overlay.
    ///
    /// # Errors
    /// Returns ConfigError if loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Returns a copy of the base configuration with CLI overrides applied
    /// and validated.
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
                config.logger.level = (*level).into();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

/// The environment the process runs in: `--env` when given, otherwise
/// `FLATVIEW_APP_ENV`.
pub fn effective_environment(cli: &Cli) -> Environment {
    cli.env.map(Environment::from).unwrap_or_else(Environment::from_env)
}
