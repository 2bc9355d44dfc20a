//! runtime.docker — bollard-backed implementation of the engine boundary

use super::types::{
    ContainerDetail, ContainerQuery, ContainerStateView, ContainerSummary, CreateSpec,
    ExecOutcome, ExecSpec, ImageDetailView, ImageQuery, ImageSummaryView, LogQuery, MountView,
    NetworkEndpointView, NetworkView, PortView, RestartPolicyView, VersionInfo,
};
use super::{ByteStream, ContainerRuntime};
use crate::config::DockerConfig;
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use bollard::container::LogOutput;
use bollard::errors::Error as BollardError;
use bollard::exec::{CreateExecOptions, StartExecOptions, StartExecResults};
use bollard::models;
use bollard::query_parameters::{
    CreateContainerOptionsBuilder, InspectContainerOptions, InspectNetworkOptions,
    ListContainersOptionsBuilder, ListImagesOptionsBuilder, ListNetworksOptions,
    LogsOptionsBuilder, RemoveContainerOptionsBuilder, RestartContainerOptionsBuilder,
    StartContainerOptions, StopContainerOptionsBuilder,
};
use bollard::{Docker, API_DEFAULT_VERSION};
use std::collections::HashMap;
use tokio_stream::StreamExt;
use tracing::warn;

/// Owns the logical connection to the Docker Engine API. bollard's client
/// is connection-pooled and safe for concurrent multiplexed use, so a
/// single instance serves every in-flight request.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Build a client for the configured endpoint. Connection setup is
    /// lazy; `ping` performs the first real round-trip.
    pub fn connect(config: &DockerConfig) -> Result<Self> {
        let host = config.host.trim();
        let timeout = config.connect_timeout_seconds;
        let docker = if let Some(path) = host.strip_prefix("unix://") {
            Docker::connect_with_socket(path, timeout, API_DEFAULT_VERSION)
        } else if host.starts_with("tcp://") || host.starts_with("http://") {
            Docker::connect_with_http(host, timeout, API_DEFAULT_VERSION)
        } else if host.is_empty() {
            Docker::connect_with_local_defaults()
        } else {
            // bare socket path
            Docker::connect_with_socket(host, timeout, API_DEFAULT_VERSION)
        };
        docker.map(|docker| Self { docker }).map_err(classify)
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn ping(&self) -> Result<()> {
        self.docker.ping().await.map_err(classify)?;
        Ok(())
    }

    async fn version(&self) -> Result<VersionInfo> {
        let version = self.docker.version().await.map_err(classify)?;
        Ok(VersionInfo {
            version: version.version,
            api_version: version.api_version,
            os: version.os,
            arch: version.arch,
            kernel_version: version.kernel_version,
        })
    }

    async fn list_containers(&self, query: &ContainerQuery) -> Result<Vec<ContainerSummary>> {
        let mut builder = ListContainersOptionsBuilder::new().all(query.all);
        if let Some(limit) = query.limit {
            builder = builder.limit(limit);
        }
        let filters = query.filters.to_map();
        if !filters.is_empty() {
            builder = builder.filters(&filters);
        }
        let containers = self
            .docker
            .list_containers(Some(builder.build()))
            .await
            .map_err(classify)?;
        Ok(containers.into_iter().map(summary_view).collect())
    }

    async fn inspect_container(&self, target: &str) -> Result<ContainerDetail> {
        let response = self
            .docker
            .inspect_container(target, None::<InspectContainerOptions>)
            .await
            .map_err(classify)?;
        Ok(detail_view(response))
    }

    async fn create_container(&self, spec: &CreateSpec) -> Result<String> {
        let env = spec.env_pairs();
        let body = models::ContainerCreateBody {
            image: Some(spec.image.clone()),
            cmd: if spec.cmd.is_empty() {
                None
            } else {
                Some(spec.cmd.clone())
            },
            env: if env.is_empty() { None } else { Some(env) },
            labels: if spec.labels.is_empty() {
                None
            } else {
                Some(spec.labels.clone())
            },
            ..models::ContainerCreateBody::default()
        };
        let options = spec
            .name
            .as_deref()
            .map(|name| CreateContainerOptionsBuilder::new().name(name).build());
        let created = self
            .docker
            .create_container(options, body)
            .await
            .map_err(classify)?;
        for warning in &created.warnings {
            warn!("engine warning during create: {warning}");
        }
        Ok(created.id)
    }

    async fn start_container(&self, target: &str) -> Result<()> {
        self.docker
            .start_container(target, None::<StartContainerOptions>)
            .await
            .map_err(classify)
    }

    async fn stop_container(&self, target: &str, timeout_secs: u32) -> Result<()> {
        let options = StopContainerOptionsBuilder::new()
            .t(timeout_secs as i32)
            .build();
        self.docker
            .stop_container(target, Some(options))
            .await
            .map_err(classify)
    }

    async fn restart_container(&self, target: &str, timeout_secs: u32) -> Result<()> {
        let options = RestartContainerOptionsBuilder::new()
            .t(timeout_secs as i32)
            .build();
        self.docker
            .restart_container(target, Some(options))
            .await
            .map_err(classify)
    }

    async fn remove_container(&self, target: &str, force: bool, volumes: bool) -> Result<()> {
        let options = RemoveContainerOptionsBuilder::new()
            .force(force)
            .v(volumes)
            .build();
        self.docker
            .remove_container(target, Some(options))
            .await
            .map_err(classify)
    }

    async fn container_logs(&self, target: &str, query: &LogQuery) -> Result<String> {
        let stream = self.docker.logs(target, Some(log_options(query, false)?));
        tokio::pin!(stream);
        let mut text = String::new();
        while let Some(item) = stream.next().await {
            let output = item.map_err(classify)?;
            text.push_str(&String::from_utf8_lossy(&output.into_bytes()));
        }
        Ok(text)
    }

    async fn follow_logs(&self, target: &str, query: &LogQuery) -> Result<ByteStream> {
        // Resolve the target first so a missing container fails the open
        // instead of surfacing mid-stream.
        self.docker
            .inspect_container(target, None::<InspectContainerOptions>)
            .await
            .map_err(classify)?;
        let stream = self.docker.logs(target, Some(log_options(query, true)?));
        Ok(Box::pin(stream.map(|item| {
            item.map(LogOutput::into_bytes).map_err(classify)
        })))
    }

    async fn exec(&self, target: &str, spec: &ExecSpec) -> Result<ExecOutcome> {
        let created = self
            .docker
            .create_exec(target, exec_options(spec))
            .await
            .map_err(classify)?;
        let started = self
            .docker
            .start_exec(&created.id, None::<StartExecOptions>)
            .await
            .map_err(classify)?;

        let mut stdout = String::new();
        let mut stderr = String::new();
        if let StartExecResults::Attached { mut output, .. } = started {
            while let Some(item) = output.next().await {
                match item.map_err(classify)? {
                    LogOutput::StdErr { message } => {
                        stderr.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdOut { message } | LogOutput::Console { message } => {
                        stdout.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdIn { .. } => {}
                }
            }
        }

        let inspect = self.docker.inspect_exec(&created.id).await.map_err(classify)?;
        Ok(ExecOutcome {
            exec_id: created.id,
            exit_code: inspect.exit_code,
            stdout,
            stderr,
        })
    }

    async fn exec_stream(&self, target: &str, spec: &ExecSpec) -> Result<(String, ByteStream)> {
        let created = self
            .docker
            .create_exec(target, exec_options(spec))
            .await
            .map_err(classify)?;
        let started = self
            .docker
            .start_exec(&created.id, None::<StartExecOptions>)
            .await
            .map_err(classify)?;
        let stream: ByteStream = match started {
            StartExecResults::Attached { output, .. } => Box::pin(
                output.map(|item| item.map(LogOutput::into_bytes).map_err(classify)),
            ),
            StartExecResults::Detached => Box::pin(tokio_stream::empty()),
        };
        Ok((created.id, stream))
    }

    async fn list_images(&self, query: &ImageQuery) -> Result<Vec<ImageSummaryView>> {
        let mut filters: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(reference) = &query.reference {
            filters.insert("reference".into(), vec![reference.clone()]);
        }
        if let Some(dangling) = query.dangling {
            filters.insert("dangling".into(), vec![dangling.to_string()]);
        }
        let mut builder = ListImagesOptionsBuilder::new().all(query.all);
        if !filters.is_empty() {
            builder = builder.filters(&filters);
        }
        let images = self
            .docker
            .list_images(Some(builder.build()))
            .await
            .map_err(classify)?;
        Ok(images.into_iter().map(image_summary_view).collect())
    }

    async fn inspect_image(&self, target: &str) -> Result<ImageDetailView> {
        let image = self.docker.inspect_image(target).await.map_err(classify)?;
        Ok(image_detail_view(image))
    }

    async fn list_networks(&self) -> Result<Vec<NetworkView>> {
        let networks = self
            .docker
            .list_networks(None::<ListNetworksOptions>)
            .await
            .map_err(classify)?;
        let mut views: Vec<NetworkView> = networks.into_iter().map(network_view).collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(views)
    }

    async fn inspect_network(&self, target: &str) -> Result<NetworkView> {
        let network = self
            .docker
            .inspect_network(target, None::<InspectNetworkOptions>)
            .await
            .map_err(classify)?;
        Ok(network_view(network))
    }
}

/// Total mapping from client failures onto the normalized taxonomy. A
/// server-sent status classifies by code; anything that prevented the
/// exchange from completing counts as the engine being unreachable; the
/// rest is Internal, never passed through raw.
pub fn classify(err: BollardError) -> BridgeError {
    match err {
        BollardError::DockerResponseServerError {
            status_code,
            message,
        } => match status_code {
            400 => BridgeError::InvalidArgument(message),
            401 | 403 => BridgeError::PermissionDenied(message),
            404 => BridgeError::NotFound(message),
            304 | 409 => BridgeError::Conflict(message),
            _ => BridgeError::Internal(format!("engine returned {status_code}: {message}")),
        },
        BollardError::RequestTimeoutError => {
            BridgeError::Unavailable("request to the container engine timed out".into())
        }
        BollardError::IOError { err } => BridgeError::Unavailable(err.to_string()),
        BollardError::HyperResponseError { err } => BridgeError::Unavailable(err.to_string()),
        BollardError::HyperLegacyError { err } => BridgeError::Unavailable(err.to_string()),
        other => BridgeError::Internal(other.to_string()),
    }
}

fn log_options(query: &LogQuery, follow: bool) -> Result<bollard::query_parameters::LogsOptions> {
    let mut builder = LogsOptionsBuilder::new()
        .follow(follow)
        .stdout(true)
        .stderr(true)
        .timestamps(query.timestamps);
    if let Some(tail) = query.tail {
        builder = builder.tail(&tail.to_string());
    }
    if let Some(since) = query.since {
        // the engine API carries `since` as a 32-bit unix timestamp
        let since = i32::try_from(since).map_err(|_| {
            BridgeError::InvalidArgument(format!("since does not fit the engine's range: {since}"))
        })?;
        builder = builder.since(since);
    }
    Ok(builder.build())
}

fn exec_options(spec: &ExecSpec) -> CreateExecOptions<String> {
    let env = spec.env_pairs();
    CreateExecOptions {
        attach_stdout: Some(true),
        attach_stderr: Some(true),
        cmd: Some(spec.cmd.clone()),
        env: if env.is_empty() { None } else { Some(env) },
        working_dir: spec.working_dir.clone(),
        user: spec.user.clone(),
        ..Default::default()
    }
}

/// Docker reports unset instants as a year-1 sentinel.
fn normalize_ts(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !v.starts_with("0001-"))
}

fn epoch_to_rfc3339(secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339())
}

fn summary_view(container: models::ContainerSummary) -> ContainerSummary {
    ContainerSummary {
        id: container.id.unwrap_or_default(),
        names: container
            .names
            .unwrap_or_default()
            .into_iter()
            .map(|name| name.trim_start_matches('/').to_string())
            .collect(),
        image: container.image.unwrap_or_default(),
        state: container
            .state
            .map(|state| state.to_string())
            .unwrap_or_default(),
        status: container.status.unwrap_or_default(),
        created_at: container.created.and_then(epoch_to_rfc3339),
        ports: container
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(port_view)
            .collect(),
        labels: container.labels.unwrap_or_default(),
    }
}

fn port_view(port: models::Port) -> PortView {
    PortView {
        private_port: port.private_port,
        public_port: port.public_port,
        protocol: port
            .typ
            .map(|typ| typ.to_string())
            .unwrap_or_else(|| "tcp".to_string()),
        host_ip: port.ip,
    }
}

fn state_view(state: models::ContainerState) -> ContainerStateView {
    ContainerStateView {
        status: state
            .status
            .map(|status| status.to_string())
            .unwrap_or_default(),
        running: state.running.unwrap_or(false),
        paused: state.paused.unwrap_or(false),
        restarting: state.restarting.unwrap_or(false),
        oom_killed: state.oom_killed.unwrap_or(false),
        dead: state.dead.unwrap_or(false),
        pid: state.pid.filter(|pid| *pid != 0),
        exit_code: state.exit_code,
        error: state.error.filter(|err| !err.is_empty()),
        started_at: normalize_ts(state.started_at),
        finished_at: normalize_ts(state.finished_at),
    }
}

fn endpoint_view(name: &str, endpoint: &models::EndpointSettings) -> NetworkEndpointView {
    NetworkEndpointView {
        network: name.to_string(),
        ip_address: endpoint.ip_address.clone().filter(|s| !s.is_empty()),
        gateway: endpoint.gateway.clone().filter(|s| !s.is_empty()),
        mac_address: endpoint.mac_address.clone().filter(|s| !s.is_empty()),
        aliases: endpoint.aliases.clone().unwrap_or_default(),
    }
}

fn mount_view(mount: models::MountPoint) -> MountView {
    MountView {
        mount_type: mount.typ.map(|typ| typ.to_string()).unwrap_or_default(),
        name: mount.name.filter(|n| !n.is_empty()),
        source: mount.source.unwrap_or_default(),
        destination: mount.destination.unwrap_or_default(),
        mode: mount.mode.unwrap_or_default(),
        rw: mount.rw.unwrap_or(true),
    }
}

fn port_map_view(ports: &HashMap<String, Option<Vec<models::PortBinding>>>) -> Vec<PortView> {
    let mut views = Vec::new();
    for (key, bindings) in ports {
        let (port_part, proto) = key.split_once('/').unwrap_or((key.as_str(), "tcp"));
        let Ok(private_port) = port_part.parse::<u16>() else {
            continue;
        };
        match bindings {
            Some(list) if !list.is_empty() => {
                for binding in list {
                    views.push(PortView {
                        private_port,
                        public_port: binding
                            .host_port
                            .as_deref()
                            .and_then(|port| port.parse().ok()),
                        protocol: proto.to_string(),
                        host_ip: binding.host_ip.clone().filter(|ip| !ip.is_empty()),
                    });
                }
            }
            _ => views.push(PortView {
                private_port,
                public_port: None,
                protocol: proto.to_string(),
                host_ip: None,
            }),
        }
    }
    views.sort_by(|a, b| {
        a.private_port
            .cmp(&b.private_port)
            .then_with(|| a.protocol.cmp(&b.protocol))
            .then_with(|| a.public_port.cmp(&b.public_port))
    });
    views
}

fn detail_view(response: models::ContainerInspectResponse) -> ContainerDetail {
    let config = response.config.unwrap_or_default();
    let host_config = response.host_config.unwrap_or_default();
    let network_settings = response.network_settings;

    let mut networks: Vec<NetworkEndpointView> = network_settings
        .as_ref()
        .and_then(|settings| settings.networks.as_ref())
        .map(|nets| {
            nets.iter()
                .map(|(name, endpoint)| endpoint_view(name, endpoint))
                .collect()
        })
        .unwrap_or_default();
    networks.sort_by(|a, b| a.network.cmp(&b.network));

    let ports = network_settings
        .as_ref()
        .and_then(|settings| settings.ports.as_ref())
        .map(|ports| port_map_view(ports))
        .unwrap_or_default();

    let mut mounts: Vec<MountView> = response
        .mounts
        .unwrap_or_default()
        .into_iter()
        .map(mount_view)
        .collect();
    mounts.sort_by(|a, b| a.destination.cmp(&b.destination));

    let restart_policy = host_config.restart_policy.and_then(|policy| {
        let name = policy.name.map(|name| name.to_string()).unwrap_or_default();
        if name.is_empty() {
            None
        } else {
            Some(RestartPolicyView {
                name,
                maximum_retry_count: policy.maximum_retry_count.unwrap_or(0),
            })
        }
    });

    ContainerDetail {
        id: response.id.unwrap_or_default(),
        name: response
            .name
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image: config.image.clone().unwrap_or_default(),
        image_id: response.image.filter(|id| !id.is_empty()),
        created_at: normalize_ts(response.created),
        state: response.state.map(state_view).unwrap_or_default(),
        hostname: config.hostname.clone().filter(|h| !h.is_empty()),
        user: config.user.clone().filter(|u| !u.is_empty()),
        env: config.env.clone().unwrap_or_default(),
        cmd: config.cmd.clone().unwrap_or_default(),
        entrypoint: config.entrypoint.clone().unwrap_or_default(),
        working_dir: config.working_dir.clone().filter(|w| !w.is_empty()),
        labels: config.labels.clone().unwrap_or_default(),
        tty: config.tty.unwrap_or(false),
        stdin_open: config.open_stdin.unwrap_or(false),
        network_mode: host_config.network_mode.filter(|m| !m.is_empty()),
        privileged: host_config.privileged.unwrap_or(false),
        cap_add: host_config.cap_add.unwrap_or_default(),
        cap_drop: host_config.cap_drop.unwrap_or_default(),
        extra_hosts: host_config.extra_hosts.unwrap_or_default(),
        security_opt: host_config.security_opt.unwrap_or_default(),
        restart_policy,
        memory_limit: host_config.memory.filter(|mem| *mem > 0),
        nano_cpus: host_config.nano_cpus.filter(|cpus| *cpus > 0),
        networks,
        mounts,
        ports,
    }
}

fn image_summary_view(image: models::ImageSummary) -> ImageSummaryView {
    ImageSummaryView {
        id: image.id,
        repo_tags: image.repo_tags,
        created_at: epoch_to_rfc3339(image.created),
        size_bytes: image.size,
        containers: image.containers,
    }
}

fn image_detail_view(image: models::ImageInspect) -> ImageDetailView {
    let (entrypoint, cmd, env, labels) = match image.config {
        Some(config) => (
            config.entrypoint.unwrap_or_default(),
            config.cmd.unwrap_or_default(),
            config.env.unwrap_or_default(),
            config.labels.unwrap_or_default(),
        ),
        None => Default::default(),
    };
    ImageDetailView {
        id: image.id.unwrap_or_default(),
        repo_tags: image.repo_tags.unwrap_or_default(),
        created_at: normalize_ts(image.created),
        architecture: image.architecture.filter(|a| !a.is_empty()),
        os: image.os.filter(|os| !os.is_empty()),
        size_bytes: image.size.unwrap_or(0),
        entrypoint,
        cmd,
        env,
        labels,
    }
}

fn network_view(network: models::Network) -> NetworkView {
    let subnets = network
        .ipam
        .as_ref()
        .and_then(|ipam| ipam.config.as_ref())
        .map(|configs| {
            configs
                .iter()
                .filter_map(|config| config.subnet.clone())
                .collect()
        })
        .unwrap_or_default();
    let mut containers: Vec<String> = network
        .containers
        .as_ref()
        .map(|attached| {
            attached
                .values()
                .filter_map(|container| container.name.clone())
                .collect()
        })
        .unwrap_or_default();
    containers.sort();

    NetworkView {
        id: network.id.unwrap_or_default(),
        name: network.name.unwrap_or_default(),
        driver: network.driver.filter(|d| !d.is_empty()),
        scope: network.scope.filter(|s| !s.is_empty()),
        created_at: normalize_ts(network.created),
        internal: network.internal.unwrap_or(false),
        attachable: network.attachable.unwrap_or(false),
        subnets,
        containers,
        labels: network.labels.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn server_error(status_code: u16) -> BollardError {
        BollardError::DockerResponseServerError {
            status_code,
            message: "boom".into(),
        }
    }

    #[test]
    fn test_classify_maps_status_codes() {
        assert_eq!(classify(server_error(400)).kind(), ErrorKind::InvalidArgument);
        assert_eq!(classify(server_error(401)).kind(), ErrorKind::PermissionDenied);
        assert_eq!(classify(server_error(403)).kind(), ErrorKind::PermissionDenied);
        assert_eq!(classify(server_error(404)).kind(), ErrorKind::NotFound);
        assert_eq!(classify(server_error(304)).kind(), ErrorKind::Conflict);
        assert_eq!(classify(server_error(409)).kind(), ErrorKind::Conflict);
        assert_eq!(classify(server_error(500)).kind(), ErrorKind::Internal);
        assert_eq!(classify(server_error(418)).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_classify_transport_failures_as_unavailable() {
        let err = classify(BollardError::RequestTimeoutError);
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.retryable());

        let io = BollardError::IOError {
            err: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(classify(io).kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_normalize_ts_drops_zero_time() {
        assert_eq!(normalize_ts(Some("0001-01-01T00:00:00Z".into())), None);
        assert_eq!(normalize_ts(Some(String::new())), None);
        assert_eq!(
            normalize_ts(Some("2024-05-01T10:00:00Z".into())),
            Some("2024-05-01T10:00:00Z".into())
        );
    }

    #[test]
    fn test_epoch_formats_rfc3339() {
        assert_eq!(
            epoch_to_rfc3339(0).as_deref(),
            Some("1970-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_summary_view_trims_name_slashes() {
        let summary = summary_view(models::ContainerSummary {
            id: Some("a1b2c3".into()),
            names: Some(vec!["/web".into()]),
            image: Some("nginx:latest".into()),
            status: Some("Up 2 hours".into()),
            created: Some(1_700_000_000),
            ..Default::default()
        });
        assert_eq!(summary.id, "a1b2c3");
        assert_eq!(summary.names, vec!["web"]);
        assert_eq!(summary.image, "nginx:latest");
        assert!(summary.created_at.is_some());
    }

    #[test]
    fn test_port_map_view_expands_bindings() {
        let mut ports: HashMap<String, Option<Vec<models::PortBinding>>> = HashMap::new();
        ports.insert(
            "80/tcp".into(),
            Some(vec![models::PortBinding {
                host_ip: Some("0.0.0.0".into()),
                host_port: Some("8080".into()),
            }]),
        );
        ports.insert("9000/udp".into(), None);

        let views = port_map_view(&ports);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].private_port, 80);
        assert_eq!(views[0].public_port, Some(8080));
        assert_eq!(views[0].protocol, "tcp");
        assert_eq!(views[1].private_port, 9000);
        assert_eq!(views[1].public_port, None);
        assert_eq!(views[1].protocol, "udp");
    }

    #[test]
    fn test_exec_options_carry_sorted_env() {
        let mut env = HashMap::new();
        env.insert("B".to_string(), "2".to_string());
        env.insert("A".to_string(), "1".to_string());
        let options = exec_options(&ExecSpec {
            cmd: vec!["echo".into(), "hi".into()],
            env,
            working_dir: Some("/srv".into()),
            user: None,
        });
        assert_eq!(options.cmd, Some(vec!["echo".into(), "hi".into()]));
        assert_eq!(options.env, Some(vec!["A=1".into(), "B=2".into()]));
        assert_eq!(options.working_dir, Some("/srv".into()));
        assert_eq!(options.attach_stdout, Some(true));
    }

    #[test]
    fn test_log_options_reject_out_of_range_since() {
        let query = LogQuery {
            since: Some(i64::from(i32::MAX) + 1),
            ..Default::default()
        };
        let err = log_options(&query, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("since"));

        let query = LogQuery {
            since: Some(1_700_000_000),
            ..Default::default()
        };
        assert!(log_options(&query, true).is_ok());
    }
}
