#![allow(dead_code)]
//! Shared fake runtime for integration tests
//!
//! `FakeRuntime` serves a fixed container inventory and counts live
//! stream handles so tests can assert that every opened handle is
//! released. Behavior knobs (`exec_hangs`, `follow_hangs`) simulate a
//! runtime that stops responding or a log stream that never ends.

use async_trait::async_trait;
use bytes::Bytes;
use docker_bridge::error::{BridgeError, Result};
use docker_bridge::runtime::types::{
    ContainerDetail, ContainerQuery, ContainerSummary, CreateSpec, ExecOutcome, ExecSpec,
    ImageDetailView, ImageQuery, ImageSummaryView, LogQuery, NetworkView, VersionInfo,
};
use docker_bridge::runtime::{ByteStream, ContainerRuntime};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio_stream::Stream;

/// Byte stream over fixed chunks that keeps a live-handle count.
pub struct GuardedStream {
    items: Vec<Result<Bytes>>,
    live: Arc<AtomicUsize>,
    hang_at_end: bool,
}

impl GuardedStream {
    pub fn stream(chunks: &[&str], live: &Arc<AtomicUsize>, hang_at_end: bool) -> ByteStream {
        live.fetch_add(1, Ordering::SeqCst);
        let mut items: Vec<Result<Bytes>> = chunks
            .iter()
            .map(|c| Ok(Bytes::from(c.to_string())))
            .collect();
        items.reverse();
        Box::pin(GuardedStream {
            items,
            live: Arc::clone(live),
            hang_at_end,
        })
    }
}

impl Stream for GuardedStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.items.pop() {
            Some(item) => Poll::Ready(Some(item)),
            None if self.hang_at_end => Poll::Pending,
            None => Poll::Ready(None),
        }
    }
}

impl Drop for GuardedStream {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn summary(id: &str, state: &str) -> ContainerSummary {
    ContainerSummary {
        id: id.to_string(),
        names: vec![format!("{id}-name")],
        image: "nginx:latest".to_string(),
        state: state.to_string(),
        status: if state == "running" {
            "Up 2 minutes".to_string()
        } else {
            "Exited (0) 5 minutes ago".to_string()
        },
        ..Default::default()
    }
}

pub struct FakeRuntime {
    pub containers: Vec<ContainerSummary>,
    pub open_handles: Arc<AtomicUsize>,
    pub log_lines: Vec<&'static str>,
    pub exec_hangs: bool,
    pub follow_hangs: bool,
}

impl FakeRuntime {
    /// Inventory from the canonical two-container fixture: "a1" running,
    /// "b2" exited.
    pub fn seeded() -> Self {
        Self {
            containers: vec![summary("a1", "running"), summary("b2", "exited")],
            open_handles: Arc::new(AtomicUsize::new(0)),
            log_lines: vec!["line one\n", "line two\n"],
            exec_hangs: false,
            follow_hangs: false,
        }
    }

    fn known(&self, target: &str) -> bool {
        self.containers
            .iter()
            .any(|c| c.id == target || c.names.iter().any(|n| n == target))
    }

    fn require(&self, target: &str) -> Result<()> {
        if self.known(target) {
            Ok(())
        } else {
            Err(BridgeError::NotFound(format!("no such container: {target}")))
        }
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn version(&self) -> Result<VersionInfo> {
        Ok(VersionInfo {
            version: Some("27.0.1".to_string()),
            api_version: Some("1.47".to_string()),
            os: Some("linux".to_string()),
            arch: Some("amd64".to_string()),
            kernel_version: None,
        })
    }

    async fn list_containers(&self, query: &ContainerQuery) -> Result<Vec<ContainerSummary>> {
        let mut rows: Vec<ContainerSummary> = self
            .containers
            .iter()
            .filter(|c| query.all || c.state == "running")
            .filter(|c| {
                // id filters are prefix matches, OR-combined like the daemon's
                query.filters.id.is_empty()
                    || query.filters.id.iter().any(|id| c.id.starts_with(id.as_str()))
            })
            .cloned()
            .collect();
        if let Some(limit) = query.limit {
            rows.truncate(limit.max(0) as usize);
        }
        Ok(rows)
    }

    async fn inspect_container(&self, target: &str) -> Result<ContainerDetail> {
        // "delay-<ms>" targets respond slowly, for interleaving tests
        if let Some(ms) = target.strip_prefix("delay-").and_then(|s| s.parse::<u64>().ok()) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            return Ok(ContainerDetail {
                id: target.to_string(),
                name: target.to_string(),
                ..Default::default()
            });
        }
        self.require(target)?;
        Ok(ContainerDetail {
            id: target.to_string(),
            name: format!("{target}-name"),
            image: "nginx:latest".to_string(),
            ..Default::default()
        })
    }

    async fn create_container(&self, spec: &CreateSpec) -> Result<String> {
        if spec.image.is_empty() {
            return Err(BridgeError::InvalidArgument("image is empty".to_string()));
        }
        Ok("c0ffee".to_string())
    }

    async fn start_container(&self, target: &str) -> Result<()> {
        self.require(target)
    }

    async fn stop_container(&self, target: &str, _timeout_secs: u32) -> Result<()> {
        self.require(target)
    }

    async fn restart_container(&self, target: &str, _timeout_secs: u32) -> Result<()> {
        self.require(target)
    }

    async fn remove_container(&self, target: &str, _force: bool, _volumes: bool) -> Result<()> {
        self.require(target)
    }

    async fn container_logs(&self, target: &str, _query: &LogQuery) -> Result<String> {
        self.require(target)?;
        Ok(self.log_lines.concat())
    }

    async fn follow_logs(&self, target: &str, _query: &LogQuery) -> Result<ByteStream> {
        self.require(target)?;
        Ok(GuardedStream::stream(
            &self.log_lines,
            &self.open_handles,
            self.follow_hangs,
        ))
    }

    async fn exec(&self, target: &str, _spec: &ExecSpec) -> Result<ExecOutcome> {
        self.require(target)?;
        if self.exec_hangs {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(ExecOutcome {
            exec_id: "ex1".to_string(),
            exit_code: Some(0),
            stdout: "ok\n".to_string(),
            stderr: String::new(),
        })
    }

    async fn exec_stream(&self, target: &str, _spec: &ExecSpec) -> Result<(String, ByteStream)> {
        self.require(target)?;
        let stream = GuardedStream::stream(&["exec out\n"], &self.open_handles, self.follow_hangs);
        if self.exec_hangs {
            // handle is live while we hang, as with a real attach that
            // stalls before returning
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(("ex1".to_string(), stream))
    }

    async fn list_images(&self, _query: &ImageQuery) -> Result<Vec<ImageSummaryView>> {
        Ok(vec![ImageSummaryView {
            id: "sha256:abc123".to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            created_at: None,
            size_bytes: 188_000_000,
            containers: 2,
        }])
    }

    async fn inspect_image(&self, target: &str) -> Result<ImageDetailView> {
        if target != "nginx:latest" && target != "sha256:abc123" {
            return Err(BridgeError::NotFound(format!("no such image: {target}")));
        }
        Ok(ImageDetailView {
            id: "sha256:abc123".to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            os: Some("linux".to_string()),
            architecture: Some("amd64".to_string()),
            size_bytes: 188_000_000,
            ..Default::default()
        })
    }

    async fn list_networks(&self) -> Result<Vec<NetworkView>> {
        Ok(vec![NetworkView {
            id: "net1".to_string(),
            name: "bridge".to_string(),
            driver: Some("bridge".to_string()),
            scope: Some("local".to_string()),
            subnets: vec!["172.17.0.0/16".to_string()],
            ..Default::default()
        }])
    }

    async fn inspect_network(&self, target: &str) -> Result<NetworkView> {
        if target != "bridge" && target != "net1" {
            return Err(BridgeError::NotFound(format!("no such network: {target}")));
        }
        Ok(NetworkView {
            id: "net1".to_string(),
            name: "bridge".to_string(),
            driver: Some("bridge".to_string()),
            scope: Some("local".to_string()),
            subnets: vec!["172.17.0.0/16".to_string()],
            containers: vec!["a1-name".to_string()],
            ..Default::default()
        })
    }
}

/// Poll a condition for up to a second.
pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
