//! MCP Server implementation.
//!
//! This module contains the protocol handler. It delegates tool listing and
//! tool calls to the [`ToolRegistry`].
//!
//! Tool listing and tool calls are answered directly from the registry
//! rather than through an rmcp `ToolRouter`, so that unknown tools and
//! handler failures come back as error results instead of protocol errors.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::{Config, ServerConfig};
use super::error::Result;
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients during initialization.
const INSTRUCTIONS: &str = "This server provides access to FRED (Federal Reserve Economic Data). \
     Use `search` to find economic data series and `series` to fetch their observations.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap; all clones share the same registry.
#[derive(Clone)]
pub struct McpServer {
    /// Name and version reported to clients.
    identity: Arc<ServerConfig>,

    /// Registry answering tool listing and tool calls.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(ToolRegistry::new(Arc::new(config.fred))?);

        Ok(Self {
            identity: Arc::new(config.server),
            registry,
        })
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        Ok(self
            .registry
            .call_tool(&request.name, request.arguments)
            .await)
    }
}
