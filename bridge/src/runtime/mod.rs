//! runtime — typed boundary to the container engine

pub mod types;

mod docker;

pub use docker::{classify, DockerRuntime};

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::pin::Pin;
use tokio_stream::Stream;
use types::{
    ContainerDetail, ContainerQuery, ContainerSummary, CreateSpec, ExecOutcome, ExecSpec,
    ImageDetailView, ImageQuery, ImageSummaryView, LogQuery, NetworkView, VersionInfo,
};

/// Byte chunks produced by a long-lived runtime operation. Dropping the
/// stream is the one and only release of the underlying handle.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Narrow operation set against the container engine. One method per
/// capability; every failure is already classified into the normalized
/// taxonomy when it crosses this boundary.
///
/// Mutating operations (start/stop/remove/create/exec) are not idempotent
/// and implementations must never retry them on their own.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn ping(&self) -> Result<()>;
    async fn version(&self) -> Result<VersionInfo>;

    async fn list_containers(&self, query: &ContainerQuery) -> Result<Vec<ContainerSummary>>;
    async fn inspect_container(&self, target: &str) -> Result<ContainerDetail>;
    async fn create_container(&self, spec: &CreateSpec) -> Result<String>;
    async fn start_container(&self, target: &str) -> Result<()>;
    async fn stop_container(&self, target: &str, timeout_secs: u32) -> Result<()>;
    async fn restart_container(&self, target: &str, timeout_secs: u32) -> Result<()>;
    async fn remove_container(&self, target: &str, force: bool, volumes: bool) -> Result<()>;

    /// Collected log tail; never follows.
    async fn container_logs(&self, target: &str, query: &LogQuery) -> Result<String>;
    /// Live log stream for a streaming session.
    async fn follow_logs(&self, target: &str, query: &LogQuery) -> Result<ByteStream>;

    /// Run a command and collect its demultiplexed output.
    async fn exec(&self, target: &str, spec: &ExecSpec) -> Result<ExecOutcome>;
    /// Run a command and hand back its output stream plus the exec id.
    async fn exec_stream(&self, target: &str, spec: &ExecSpec) -> Result<(String, ByteStream)>;

    async fn list_images(&self, query: &ImageQuery) -> Result<Vec<ImageSummaryView>>;
    async fn inspect_image(&self, target: &str) -> Result<ImageDetailView>;
    async fn list_networks(&self) -> Result<Vec<NetworkView>>;
    async fn inspect_network(&self, target: &str) -> Result<NetworkView>;
}
