//! Configuration management for the portfolio API
//!
//! Supports loading configuration from:
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Environment variables (prefixed with APP__)
//! - Plain deployment variables (PORT, DATABASE_URL, DATABASE_NAME)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection string. `None` starts the service disconnected,
    /// `memory://` selects the in-process store.
    pub url: Option<String>,

    /// Database name (falls back to the one in the connection string)
    pub name: Option<String>,

    /// Server selection / connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default)]
    pub metrics_port: u16,

    /// Service name reported in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_connect_timeout_ms() -> u64 { 3000 }
fn default_log_level() -> String { "info".to_string() }
fn default_service_name() -> String { "portfolio-api".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            metrics_port: 0,
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, resolving the plain deployment variables
    /// through `lookup` instead of the process environment
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            // Plain variables set by the hosting platform win over everything
            .set_override_option("server.port", lookup("PORT"))?
            .set_override_option("database.url", lookup("DATABASE_URL"))?
            .set_override_option("database.name", lookup("DATABASE_NAME"))?

            .build()?;

        config.try_deserialize()
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_load_without_deployment_variables() {
        let config = AppConfig::load_with(|_| None).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.connect_timeout_ms, 3000);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_deployment_variables_override() {
        let config = AppConfig::load_with(|key| match key {
            "PORT" => Some("9100".to_string()),
            "DATABASE_URL" => Some("mongodb://db.internal:27017".to_string()),
            "DATABASE_NAME" => Some("folio".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.url.as_deref(), Some("mongodb://db.internal:27017"));
        assert_eq!(config.database.name.as_deref(), Some("folio"));
    }

    #[test]
    fn test_malformed_port_is_rejected() {
        let result = AppConfig::load_with(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }
}
