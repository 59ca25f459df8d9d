//! STDIO transport for the MCP server.
//!
//! Protocol messages flow over stdin/stdout and logs go to stderr. A session
//! ends when the host closes the pipe or the process receives Ctrl-C.

use rmcp::ServiceExt;
use thiserror::Error;
use tracing::info;

use super::server::McpServer;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures of the MCP session itself (tool failures never reach here).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The MCP handshake with the host did not complete.
    #[error("Failed to start MCP session: {0}")]
    Init(String),

    /// The running session terminated abnormally.
    #[error("MCP session failed: {0}")]
    Session(String),

    /// The interrupt handler could not be installed.
    #[error("Failed to listen for interrupt signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` over stdin/stdout until the host disconnects or an
    /// interrupt arrives.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::Init(e.to_string()))?;

        info!("Ready - communicating via stdin/stdout");

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::Session(e.to_string()))?;
                info!("Host disconnected");
            }
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(TransportError::Signal)?;
                info!("Interrupt received, shutting down");
            }
        }

        Ok(())
    }
}
