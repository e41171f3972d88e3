//! Configuration management for the tickoff server.
//!
//! Settings are layered, each layer overriding the previous one:
//!
//! 1. **Defaults**: `127.0.0.1:8000`, database in the per-user data directory
//! 2. **Config file**: `config.json` in the data directory
//! 3. **Environment**: `TICKOFF_HOST`, `TICKOFF_PORT`, `TICKOFF_DATABASE`
//!    (a `.env` file in the working directory is loaded first)
//! 4. **Command line**: `--host`, `--port`, `--database`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use tickoff::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides(|key| std::env::var(key).ok())?;
//! println!("listening on {}", config.server.address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Database file name used when no explicit path is configured.
pub const DB_FILE_NAME: &str = "tickoff.db";

pub const ENV_HOST: &str = "TICKOFF_HOST";
pub const ENV_PORT: &str = "TICKOFF_PORT";
pub const ENV_DATABASE: &str = "TICKOFF_DATABASE";

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Database location. `None` means `tickoff.db` in the data directory.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Root configuration object, persisted as pretty-printed JSON.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Reads `config.json` from the data directory, falling back to defaults
    /// when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        msg_debug!(Message::ConfigLoaded(path.display().to_string()));
        Ok(config)
    }

    /// Writes the configuration to the data directory and returns the file path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies `TICKOFF_*` overrides obtained through `lookup`. Empty values
    /// are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.server.port = match port.parse() {
                Ok(port) => port,
                Err(_) => msg_bail_anyhow!(Message::ConfigInvalidValue {
                    key: ENV_PORT.to_string(),
                    value: port,
                }),
            };
        }
        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// Loads `.env`, then the config file, then the process environment.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();
        Self::read()?.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Resolved database path.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
