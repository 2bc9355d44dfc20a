//! Bridge configuration loading and parsing

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "/etc/docker-bridge/config.toml";

/// Root configuration structure
#[derive(Debug, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub streaming: StreamingConfig,
    #[serde(default)]
    pub containers: ContainerDefaults,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            docker: DockerConfig::default(),
            dispatch: DispatchConfig::default(),
            streaming: StreamingConfig::default(),
            containers: ContainerDefaults::default(),
        }
    }
}

/// Connection target for the Docker Engine API. `host` accepts a unix
/// socket path (`unix:///var/run/docker.sock`) or a `tcp://` URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    #[serde(default = "default_docker_host")]
    pub host: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: default_docker_host(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamingConfig {
    #[serde(default = "default_chunk_window")]
    pub chunk_window: usize,
    #[serde(default = "default_chunk_bytes")]
    pub chunk_bytes: usize,
    #[serde(default = "default_close_grace_ms")]
    pub close_grace_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_window: default_chunk_window(),
            chunk_bytes: default_chunk_bytes(),
            close_grace_ms: default_close_grace_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerDefaults {
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout_seconds: u32,
    #[serde(default = "default_log_tail")]
    pub log_tail: u32,
}

impl Default for ContainerDefaults {
    fn default() -> Self {
        Self {
            stop_timeout_seconds: default_stop_timeout(),
            log_tail: default_log_tail(),
        }
    }
}

impl BridgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch.request_timeout_seconds)
    }

    pub fn close_grace(&self) -> Duration {
        Duration::from_millis(self.streaming.close_grace_ms)
    }
}

// Default value functions
fn default_docker_host() -> String { "unix:///var/run/docker.sock".into() }
fn default_connect_timeout() -> u64 { 120 }
fn default_request_timeout() -> u64 { 30 }
fn default_chunk_window() -> usize { 32 }
fn default_chunk_bytes() -> usize { 16 * 1024 }
fn default_close_grace_ms() -> u64 { 500 }
fn default_stop_timeout() -> u32 { 10 }
fn default_log_tail() -> u32 { 100 }

/// Load configuration from /etc/docker-bridge/config.toml (or the path in
/// BRIDGE_CONFIG). `DOCKER_HOST` overrides the file's endpoint either way.
pub fn load_config() -> Result<BridgeConfig> {
    let config_path =
        std::env::var("BRIDGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&config_path).exists() {
        load_from(Path::new(&config_path))?
    } else {
        tracing::warn!("Config file not found at {config_path}, using defaults");
        BridgeConfig::default()
    };

    if let Ok(host) = std::env::var("DOCKER_HOST") {
        if !host.is_empty() {
            config.docker.host = host;
        }
    }

    Ok(config)
}

pub fn load_from(path: &Path) -> Result<BridgeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: BridgeConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.docker.host, "unix:///var/run/docker.sock");
        assert_eq!(config.dispatch.request_timeout_seconds, 30);
        assert_eq!(config.streaming.chunk_window, 32);
        assert_eq!(config.streaming.chunk_bytes, 16 * 1024);
        assert_eq!(config.containers.stop_timeout_seconds, 10);
        assert_eq!(config.containers.log_tail, 100);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml_str = r#"
[docker]
host = "tcp://10.0.0.5:2375"

[dispatch]
request_timeout_seconds = 5
"#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.docker.host, "tcp://10.0.0.5:2375");
        assert_eq!(config.dispatch.request_timeout_seconds, 5);
        // untouched sections keep defaults
        assert_eq!(config.streaming.close_grace_ms, 500);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[docker]
host = "unix:///run/user/1000/docker.sock"
connect_timeout_seconds = 60

[dispatch]
request_timeout_seconds = 120

[streaming]
chunk_window = 8
chunk_bytes = 4096
close_grace_ms = 250

[containers]
stop_timeout_seconds = 3
log_tail = 50
"#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.docker.connect_timeout_seconds, 60);
        assert_eq!(config.streaming.chunk_window, 8);
        assert_eq!(config.streaming.chunk_bytes, 4096);
        assert_eq!(config.close_grace(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.containers.stop_timeout_seconds, 3);
        assert_eq!(config.containers.log_tail, 50);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dispatch]\nrequest_timeout_seconds = 7").unwrap();

        let config = load_from(file.path()).unwrap();
        assert_eq!(config.dispatch.request_timeout_seconds, 7);
        assert_eq!(config.docker.host, "unix:///var/run/docker.sock");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = load_from(Path::new("/nonexistent/bridge.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
