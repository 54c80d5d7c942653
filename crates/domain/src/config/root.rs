use std::path::Path;

use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::handler::HandlerConfig;
use super::logging::LoggingConfig;
use super::remote::RemoteConfig;
use super::resync::ResyncConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "zoneward.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/zoneward/config.toml";

/// Main configuration structure for Zoneward
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, TCP limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Authorization policy for QUERY and AXFR
    #[serde(default)]
    pub handler: HandlerConfig,

    /// Background zone resync queue
    #[serde(default)]
    pub resync: ResyncConfig,

    /// Queries and transfers against zone masters
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zoneward.toml in current directory
    /// 3. /etc/zoneward/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(enforce) = overrides.enforce_tsig {
            self.handler.query_enforce_tsig = enforce;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            )));
        }

        if self.handler.default_pool_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "handler.default_pool_id cannot be empty".to_string(),
            ));
        }

        if self.resync.workers == 0 {
            return Err(ConfigError::Validation(
                "resync.workers must be at least 1".to_string(),
            ));
        }

        if self.resync.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "resync.queue_capacity must be at least 1".to_string(),
            ));
        }

        if self.resync.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "resync.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.remote.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "remote.timeout_ms cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub enforce_tsig: Option<bool>,
}
