//! docker-bridge — MCP server for container management
//!
//! Exposes a container runtime daemon as a set of MCP tools over stdio:
//! - Container lifecycle (list, inspect, create, start, stop, restart, remove)
//! - Logs and exec, one-shot or as pull-based streaming sessions
//! - Read-only image and network views
//! - Guide prompts for common workflows

pub mod config;
pub mod dispatch;
pub mod error;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod runtime;
pub mod schema;
pub mod server;
pub mod session;
pub mod tools;

pub use config::{load_config, BridgeConfig};
pub use dispatch::{Dispatcher, ToolCall, ToolOutcome};
pub use error::{BridgeError, ErrorKind, Result};
pub use protocol::McpServer;
pub use registry::{CallContext, Registry, Tool, ToolHandler};
pub use runtime::{ContainerRuntime, DockerRuntime};
pub use session::{ReadChunk, SessionManager, SessionStatus};
