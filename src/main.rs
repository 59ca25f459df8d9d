//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, and serves the FRED tools over
//! stdin/stdout until the host disconnects or an interrupt signal arrives.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use fred_mcp_server::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing API key is fatal: the process does not start.
    let config = Config::from_env()?;

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    if !config.fred.uses_default_endpoint() {
        info!("Using FRED API base URL: {}", config.fred.base_url);
    }

    let server = McpServer::new(config)?;

    info!("Server initialized");

    if let Err(e) = StdioTransport::run(server).await {
        error!("Transport failed: {}", e);
        return Err(e.into());
    }

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs are written to stderr; stdout is reserved for MCP messages.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
