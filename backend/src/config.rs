//! Configuration management for the weather forecast service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/default, config/<environment>)
//! 3. Environment variable overrides with WX__ prefix

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// National Weather Service client configuration
    pub nws: NwsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Upper bound on handling a single inbound request
    pub request_timeout_secs: u64,

    /// OpenAPI document served at `/doc`
    pub doc_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NwsConfig {
    /// API root, e.g. `https://api.weather.gov`
    pub base_url: String,

    /// Identity sent with every upstream request
    pub user_agent: String,

    /// Per-call timeout for upstream requests
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WX_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config: Config = Self::defaults(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WX__ prefix)
            .add_source(
                Environment::with_prefix("WX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.doc_path", "./weather_app.yaml")?
            .set_default("nws.base_url", "https://api.weather.gov")?
            .set_default("nws.user_agent", "WeatherApp/v1")?
            .set_default("nws.timeout_ms", 10_000)
    }

    /// Reject settings the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port not set".into()));
        }
        if self.nws.base_url.trim().is_empty() {
            return Err(ConfigError::Message("nws.base_url not set".into()));
        }
        if self.nws.timeout_ms == 0 {
            return Err(ConfigError::Message("nws.timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl NwsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            nws: NwsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            request_timeout_secs: 30,
            doc_path: "./weather_app.yaml".to_string(),
        }
    }
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "WeatherApp/v1".to_string(),
            timeout_ms: 10_000,
        }
    }
}
