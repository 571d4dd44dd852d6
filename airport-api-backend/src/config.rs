//! Configuration for the airport API.
//!
//! Values are layered with figment, later sources win:
//! 1. built-in defaults
//! 2. TOML file (`airport-api.toml` in the working directory, or `--config FILE`)
//! 3. environment variables prefixed with `AIRPORT_API_`, nested keys split on `__`
//! 4. command-line flags

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

/// Config file picked up from the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "airport-api.toml";

const ENV_PREFIX: &str = "AIRPORT_API_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("Config file {} does not exist.", .0.display())]
    MissingFile(PathBuf),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads, actix picks one per core when unset.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON array of airports loaded once at startup.
    pub path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/airports.json"),
        }
    }
}

impl Config {
    /// Load every layer, apply the command-line overrides and validate the result.
    pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
        let config = Self::load_from(cli.config.as_deref())?.with_overrides(cli);
        config.validate()?;

        Ok(config)
    }

    /// Defaults, TOML file and environment, without command-line overrides or validation.
    ///
    /// An explicitly named file has to exist, the default one is optional.
    pub fn load_from(config_path: Option<&Path>) -> Result<Config, ConfigError> {
        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()))
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Config {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(dataset) = &cli.dataset {
            self.dataset.path = dataset.clone();
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == Some(0) {
            return Err(ConfigError::Validation(
                "server.workers must be at least 1 when set".to_string(),
            ));
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "dataset.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
