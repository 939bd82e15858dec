//! Configuration file support for Extrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/extrack/config.toml`, then
//! overridden by `PORT`, `EXTRACK_HOST` and `EXTRACK_STORE_URL`.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "EXTRACK_HOST";
pub const ENV_STORE_URL: &str = "EXTRACK_STORE_URL";

/// Application configuration
#[derive(Clone, Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP listener configuration
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Record store configuration
#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    /// Connection string, e.g. `memory:` or `file:///path/to/exercises.json`
    #[serde(default = "default_store_url")]
    pub url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

fn default_store_url() -> String {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    format!("file://{}", base.join("extrack").join("exercises.json").display())
}

impl Config {
    /// Load configuration from the standard config path, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        let config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Self::default()
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from an environment-style lookup.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|e| {
                Error::Config(format!("{}={:?} is not a valid port: {}", ENV_PORT, port, e))
            })?;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store.url = url;
        }
        Ok(self)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("extrack").join("config.toml")
    }
}
