//! Error types for server startup.
//!
//! Tool failures never surface through this type; the registry folds them
//! into tool result envelopes. Session failures use
//! [`TransportError`](super::transport::TransportError).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors (e.g. a missing API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The outbound HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
