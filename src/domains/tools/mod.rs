//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are read-only queries against the FRED web API that MCP clients
//! can call by name.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Ordered tool list and name-based dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/fred/` with params, `to_tool()` and `call()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `list_tools()` and the `call_tool()` match in `registry.rs`

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::ToolRegistry;
