//! docker-bridge — MCP server for container management
//!
//! Reads MCP JSON-RPC frames from stdin and answers on stdout; logs go
//! to stderr so the wire stays clean.

use anyhow::{Context, Result};
use docker_bridge::dispatch::Dispatcher;
use docker_bridge::protocol::McpServer;
use docker_bridge::registry::Registry;
use docker_bridge::runtime::{ContainerRuntime, DockerRuntime};
use docker_bridge::session::SessionManager;
use docker_bridge::{load_config, server, tools};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("Docker Bridge starting...");

    let config = load_config().context("Failed to load configuration")?;
    let runtime = DockerRuntime::connect(&config.docker).context("Failed to set up Docker client")?;

    // The daemon may come up later; a dead socket surfaces per-call as
    // a retryable failure, so a failed probe is not fatal.
    match runtime.ping().await {
        Ok(()) => info!("Connected to Docker daemon"),
        Err(err) => warn!("Docker daemon not reachable yet: {err}"),
    }

    let runtime: Arc<dyn ContainerRuntime> = Arc::new(runtime);
    let sessions = Arc::new(SessionManager::new(&config.streaming));
    let mut registry = Registry::new();
    tools::register_all(&mut registry, &runtime, &sessions, &config)
        .context("Failed to build tool catalog")?;

    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        Arc::clone(&sessions),
        config.request_timeout(),
    );
    let mcp = Arc::new(McpServer::new(Arc::new(dispatcher)));

    server::serve(mcp).await.context("Server loop failed")?;

    info!("Docker Bridge stopped");
    Ok(())
}
