//! container.exec / container.exec_attach — Run a command in a container
//!
//! `container.exec` waits for the command and returns its collected
//! output and exit code. `container.exec_attach` starts the command and
//! hands back a streaming session for its output instead, for commands
//! that run long or produce more than fits in one response.

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::{ExecOutcome, ExecSpec};
use crate::runtime::ContainerRuntime;
use crate::schema;
use crate::session::SessionManager;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct ExecInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
    /// Command and its arguments, e.g. ["ls", "-la", "/tmp"].
    #[schemars(length(min = 1))]
    cmd: Vec<String>,
    /// Extra environment variables for the command.
    #[serde(default)]
    env: HashMap<String, String>,
    /// Working directory inside the container.
    #[serde(default)]
    working_dir: Option<String>,
    /// User to run as ("name", "uid", or "uid:gid").
    #[serde(default)]
    user: Option<String>,
}

impl ExecInput {
    fn spec(&self) -> ExecSpec {
        ExecSpec {
            cmd: self.cmd.clone(),
            env: self.env.clone(),
            working_dir: self.working_dir.clone(),
            user: self.user.clone(),
        }
    }
}

struct ExecCommand {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for ExecCommand {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: ExecInput = schema::parse_arguments(args)?;
        let outcome = self.runtime.exec(&req.target, &req.spec()).await?;
        schema::to_output(&outcome)
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.exec",
        "Run a command inside a running container and wait for it. Returns stdout, stderr, and the exit code.",
        schema::schema_of::<ExecInput>(),
        schema::schema_of::<ExecOutcome>(),
        Arc::new(ExecCommand {
            runtime: Arc::clone(runtime),
        }),
    )
}

#[derive(Debug, Serialize, JsonSchema)]
struct ExecAttachOutput {
    /// Token for session.read and session.close.
    session_id: String,
    /// Runtime-side exec id, usable with the runtime's own tooling.
    exec_id: String,
    target: String,
}

struct ExecAttach {
    runtime: Arc<dyn ContainerRuntime>,
    sessions: Arc<SessionManager>,
}

#[async_trait]
impl ToolHandler for ExecAttach {
    async fn call(&self, ctx: CallContext, args: Value) -> Result<Value> {
        let req: ExecInput = schema::parse_arguments(args)?;
        let (exec_id, stream) = self.runtime.exec_stream(&req.target, &req.spec()).await?;
        let session_id = self.sessions.open(ctx.request_id, stream).await;
        schema::to_output(&ExecAttachOutput {
            session_id,
            exec_id,
            target: req.target,
        })
    }
}

pub fn attach_tool(
    runtime: &Arc<dyn ContainerRuntime>,
    sessions: &Arc<SessionManager>,
) -> Result<Tool> {
    Tool::new(
        "container.exec_attach",
        "Run a command inside a running container and stream its output. Returns a session id; pull chunks with session.read and release with session.close.",
        schema::schema_of::<ExecInput>(),
        schema::schema_of::<ExecAttachOutput>(),
        Arc::new(ExecAttach {
            runtime: Arc::clone(runtime),
            sessions: Arc::clone(sessions),
        }),
    )
}
