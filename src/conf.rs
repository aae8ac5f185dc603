use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable prefix for config overrides, e.g.
/// `MILEAPP_DATABASE__URI` maps onto `database.uri`.
const ENV_PREFIX: &str = "MILEAPP";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config")]
    InvalidConfigError(#[from] config::ConfigError),
    #[error("could not find config file")]
    ConfigFileNotFound,
    #[error("database uri must not be empty")]
    MissingUriError,
    #[error("database name must not be empty")]
    MissingDatabaseNameError,
}

/// Loads environment variables from a .env file if one exists.
/// Call early in application startup, before any configuration loading.
/// A missing .env file is fine; the system environment may already
/// carry everything needed.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {
            debug!("no .env file found, using system environment variables only")
        }
        Err(e) => warn!("found a .env file but failed to load it: {}", e),
    }
}

/// Configuration for the database connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            uri: "mongodb://localhost:27017".to_string(),
            name: "mileapp_db".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_default_path() -> Result<Self, ConfigError> {
        Self::from_path(None)
    }

    /// Load configuration from an optional YAML file, then apply
    /// `MILEAPP_`-prefixed environment variables on top. An explicitly
    /// given path must exist; the default path may be absent, in which
    /// case the built-in defaults are used.
    pub fn from_path(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(ConfigError::ConfigFileNotFound);
                }
                builder = builder.add_source(File::from(Path::new(path)));
            }
            None => {
                builder =
                    builder.add_source(File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.uri.is_empty() {
            return Err(ConfigError::MissingUriError);
        }
        if self.database.name.is_empty() {
            return Err(ConfigError::MissingDatabaseNameError);
        }
        Ok(())
    }
}
