//! Typed views and argument structs for runtime operations.
//!
//! These are the shapes tool handlers exchange with the runtime adapter.
//! They carry no client-library types so tests can construct them freely.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One published or exposed port on a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PortView {
    pub private_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
}

/// Row in a container listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub ports: Vec<PortView>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Per-network attachment of a container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NetworkEndpointView {
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MountView {
    #[serde(rename = "type")]
    pub mount_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub source: String,
    pub destination: String,
    pub mode: String,
    pub rw: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RestartPolicyView {
    pub name: String,
    pub maximum_retry_count: i64,
}

/// Process state of an inspected container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerStateView {
    pub status: String,
    pub running: bool,
    pub paused: bool,
    pub restarting: bool,
    pub oom_killed: bool,
    pub dead: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

/// Full inspect view of one container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerDetail {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub state: ContainerStateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default)]
    pub entrypoint: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub tty: bool,
    pub stdin_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    pub privileged: bool,
    #[serde(default)]
    pub cap_add: Vec<String>,
    #[serde(default)]
    pub cap_drop: Vec<String>,
    #[serde(default)]
    pub extra_hosts: Vec<String>,
    #[serde(default)]
    pub security_opt: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<RestartPolicyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nano_cpus: Option<i64>,
    #[serde(default)]
    pub networks: Vec<NetworkEndpointView>,
    #[serde(default)]
    pub mounts: Vec<MountView>,
    #[serde(default)]
    pub ports: Vec<PortView>,
}

/// Listing filters supported by the Docker Engine `/containers/json` call.
/// Each key accepts several values, OR-combined by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerFilters {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub id: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub ancestor: Vec<String>,
}

impl ContainerFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.name.is_empty()
            && self.id.is_empty()
            && self.label.is_empty()
            && self.ancestor.is_empty()
    }

    /// Wire form consumed by the engine API.
    pub fn to_map(&self) -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        for (key, values) in [
            ("status", &self.status),
            ("name", &self.name),
            ("id", &self.id),
            ("label", &self.label),
            ("ancestor", &self.ancestor),
        ] {
            if !values.is_empty() {
                map.insert(key.to_string(), values.clone());
            }
        }
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerQuery {
    pub all: bool,
    pub limit: Option<i32>,
    pub filters: ContainerFilters,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub tail: Option<u32>,
    pub timestamps: bool,
    /// Unix timestamp; only lines after this instant are returned.
    pub since: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecSpec {
    pub cmd: Vec<String>,
    pub env: HashMap<String, String>,
    pub working_dir: Option<String>,
    pub user: Option<String>,
}

/// Environment map in the sorted `KEY=VALUE` form the engine expects.
fn format_env(env: &HashMap<String, String>) -> Vec<String> {
    let mut pairs: Vec<String> = env
        .iter()
        .map(|(key, val)| format!("{key}={val}"))
        .collect();
    pairs.sort();
    pairs
}

impl ExecSpec {
    pub fn env_pairs(&self) -> Vec<String> {
        format_env(&self.env)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSpec {
    pub image: String,
    pub name: Option<String>,
    pub cmd: Vec<String>,
    pub env: HashMap<String, String>,
    pub labels: HashMap<String, String>,
}

impl CreateSpec {
    pub fn env_pairs(&self) -> Vec<String> {
        format_env(&self.env)
    }
}

/// Collected (non-streaming) exec result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExecOutcome {
    pub exec_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageQuery {
    pub all: bool,
    pub reference: Option<String>,
    pub dangling: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageSummaryView {
    pub id: String,
    #[serde(default)]
    pub repo_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub size_bytes: i64,
    pub containers: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageDetailView {
    pub id: String,
    #[serde(default)]
    pub repo_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    pub size_bytes: i64,
    #[serde(default)]
    pub entrypoint: Vec<String>,
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NetworkView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub internal: bool,
    pub attachable: bool,
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub containers: Vec<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VersionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_version: Option<String>,
}
