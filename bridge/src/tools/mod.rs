//! Tool catalog — everything the bridge exposes
//!
//! Families are registered in a fixed order so the catalog reads the
//! same way on every start: container lifecycle first, then images,
//! networks, session access, and the runtime version probe.

pub mod container;
pub mod image;
pub mod network;
pub mod session;
pub mod system;

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::registry::Registry;
use crate::runtime::ContainerRuntime;
use crate::session::SessionManager;
use std::sync::Arc;
use tracing::info;

/// Build the full catalog. Called once at startup; the registry is
/// immutable afterwards.
pub fn register_all(
    registry: &mut Registry,
    runtime: &Arc<dyn ContainerRuntime>,
    sessions: &Arc<SessionManager>,
    config: &BridgeConfig,
) -> Result<()> {
    container::register_tools(registry, runtime, sessions, &config.containers)?;
    image::register_tools(registry, runtime)?;
    network::register_tools(registry, runtime)?;
    session::register_tools(registry, sessions)?;
    system::register_tools(registry, runtime)?;
    info!("Tool catalog ready: {} tools", registry.tool_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::runtime::types::*;
    use crate::runtime::ByteStream;
    use async_trait::async_trait;

    struct NullRuntime;

    #[async_trait]
    impl ContainerRuntime for NullRuntime {
        async fn ping(&self) -> Result<()> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn version(&self) -> Result<VersionInfo> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn list_containers(&self, _: &ContainerQuery) -> Result<Vec<ContainerSummary>> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn inspect_container(&self, _: &str) -> Result<ContainerDetail> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn create_container(&self, _: &CreateSpec) -> Result<String> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn start_container(&self, _: &str) -> Result<()> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn stop_container(&self, _: &str, _: u32) -> Result<()> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn restart_container(&self, _: &str, _: u32) -> Result<()> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn remove_container(&self, _: &str, _: bool, _: bool) -> Result<()> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn container_logs(&self, _: &str, _: &LogQuery) -> Result<String> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn follow_logs(&self, _: &str, _: &LogQuery) -> Result<ByteStream> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn exec(&self, _: &str, _: &ExecSpec) -> Result<ExecOutcome> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn exec_stream(&self, _: &str, _: &ExecSpec) -> Result<(String, ByteStream)> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn list_images(&self, _: &ImageQuery) -> Result<Vec<ImageSummaryView>> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn inspect_image(&self, _: &str) -> Result<ImageDetailView> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn list_networks(&self) -> Result<Vec<NetworkView>> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
        async fn inspect_network(&self, _: &str) -> Result<NetworkView> {
            Err(BridgeError::Unavailable("null runtime".into()))
        }
    }

    fn full_registry() -> Registry {
        let mut registry = Registry::new();
        let runtime: Arc<dyn ContainerRuntime> = Arc::new(NullRuntime);
        let config = BridgeConfig::default();
        let sessions = Arc::new(SessionManager::new(&config.streaming));
        register_all(&mut registry, &runtime, &sessions, &config).unwrap();
        registry
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let registry = full_registry();
        let names: Vec<&str> = registry.list().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "container.list",
                "container.inspect",
                "container.create",
                "container.start",
                "container.stop",
                "container.restart",
                "container.remove",
                "container.logs",
                "container.follow_logs",
                "container.exec",
                "container.exec_attach",
                "image.list",
                "image.inspect",
                "network.list",
                "network.inspect",
                "session.read",
                "session.close",
                "system.version",
            ]
        );
    }

    #[test]
    fn test_every_tool_has_schemas_and_description() {
        let registry = full_registry();
        assert_eq!(registry.tool_count(), 18);
        for tool in registry.list() {
            assert!(!tool.description.is_empty(), "{} lacks description", tool.name);
            assert!(tool.input_schema.is_object(), "{} input schema", tool.name);
            assert!(tool.output_schema.is_object(), "{} output schema", tool.name);
        }
    }

    #[test]
    fn test_registering_catalog_twice_hits_duplicate_guard() {
        let mut registry = full_registry();
        let runtime: Arc<dyn ContainerRuntime> = Arc::new(NullRuntime);
        let config = BridgeConfig::default();
        let sessions = Arc::new(SessionManager::new(&config.streaming));
        let err = register_all(&mut registry, &runtime, &sessions, &config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::DuplicateTool);
    }
}
