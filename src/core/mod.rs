//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration, startup errors, the protocol handler and the STDIO
//! transport.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, FredConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{StdioTransport, TransportError};
