//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) on top of defaults.
//! The FRED API key is the only required value.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default base URL of the FRED web API.
pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// FRED API access.
    pub fred: FredConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the FRED web API.
#[derive(Clone, Serialize, Deserialize)]
pub struct FredConfig {
    /// FRED API key. Get a free key at: https://fred.stlouisfed.org/docs/api/api_key.html
    pub api_key: String,

    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FredConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FredConfig {
    /// Create a FRED configuration against the public API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_FRED_BASE_URL.to_string(),
        }
    }

    /// Point the client at another base URL (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether requests go to the public FRED API.
    pub fn uses_default_endpoint(&self) -> bool {
        self.base_url == DEFAULT_FRED_BASE_URL
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "fred-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a configuration with default values and the given FRED settings.
    pub fn new(fred: FredConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            fred,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `FRED_API_KEY` is required. Server settings use the `MCP_` prefix,
    /// for example `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::config("FRED_API_KEY environment variable is required"))?;

        let mut fred = FredConfig::new(api_key);
        if let Ok(base_url) = std::env::var("FRED_API_BASE_URL") {
            fred = fred.with_base_url(base_url);
        }

        let mut config = Self::new(fred);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}
