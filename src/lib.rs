//! FRED MCP Server Library
//!
//! This crate exposes the FRED (Federal Reserve Economic Data) web API to AI
//! agent hosts as Model Context Protocol (MCP) tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and the STDIO transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The `search` and `series` tools and their registry
//!
//! # Example
//!
//! ```rust,no_run
//! use fred_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
