//! Configuration module for the Support System API

mod auth;
mod database;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SUPPORT_API_";

/// Main configuration structure for the Support System API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and the
    /// environment (`SUPPORT_API_` prefix), in increasing precedence
    pub fn load(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, figment::Error> {
        let config = Self::default();
        toml::to_string_pretty(&config)
            .map_err(|e| figment::Error::from(format!("Failed to serialize config: {e}")))
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.server.bind_address.port(), 3001);
        assert_eq!(config.database.url, "sqlite:support-api.db");
    }

    #[test]
    fn test_generate_example_is_valid_toml() {
        let example = Config::generate_example().unwrap();
        let parsed: toml::Value = toml::from_str(&example).unwrap();
        assert!(parsed.get("server").is_some());
        assert!(parsed.get("database").is_some());
    }
}
