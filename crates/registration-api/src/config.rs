//! Configuration for the registration API.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string: `memory://`, `file://<path>` or a bare path
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_database_url() -> String {
    "file://data/registrations.json".into()
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nested keys use `__` (`SERVER__PORT`, `DATABASE__URL`). The flat
    /// `PORT` and `DATABASE_URL` variables take precedence when set.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(false),
            std::env::var("PORT").ok(),
            std::env::var("DATABASE_URL").ok(),
        )
    }

    fn from_source<S>(source: S, port: Option<String>, database_url: Option<String>) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .set_override_option("server.port", port)
            .context("Failed to apply PORT override")?
            .set_override_option("database.url", database_url)
            .context("Failed to apply DATABASE_URL override")?
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default()
            .separator("__")
            .try_parsing(false)
            .source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_source(env(&[]), None, None).unwrap();

        assert_eq!(config.database.url, "file://data/registrations.json");
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_nested_environment() {
        let config = Config::from_source(
            env(&[
                ("DATABASE__URL", "memory://"),
                ("SERVER__PORT", "8080"),
                ("LOG__LEVEL", "debug"),
            ]),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.database.url, "memory://");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_flat_overrides_win() {
        let config = Config::from_source(
            env(&[("SERVER__PORT", "8080")]),
            Some("4000".into()),
            Some("file:///srv/registrations.json".into()),
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.url, "file:///srv/registrations.json");
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_source(env(&[]), Some("not-a-port".into()), None);
        assert!(result.is_err());
    }
}
