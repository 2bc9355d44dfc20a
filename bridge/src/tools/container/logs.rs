//! container.logs / container.follow_logs — Container log retrieval
//!
//! `container.logs` returns a bounded snapshot in one shot.
//! `container.follow_logs` opens a streaming session; the caller pulls
//! chunks with `session.read` and must `session.close` when done.

use crate::config::ContainerDefaults;
use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::LogQuery;
use crate::runtime::ContainerRuntime;
use crate::schema;
use crate::session::SessionManager;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct LogsInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
    /// Number of trailing lines to fetch; 0 means everything.
    #[serde(default)]
    tail: Option<u32>,
    /// Prefix each line with its timestamp.
    #[serde(default)]
    timestamps: bool,
    /// Only lines logged after this Unix timestamp.
    #[serde(default)]
    since: Option<i64>,
}

impl LogsInput {
    fn query(&self, default_tail: u32) -> LogQuery {
        let tail = match self.tail {
            Some(0) => None,
            Some(n) => Some(n),
            None => Some(default_tail),
        };
        LogQuery {
            tail,
            timestamps: self.timestamps,
            since: self.since,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
struct LogsOutput {
    target: String,
    logs: String,
}

struct FetchLogs {
    runtime: Arc<dyn ContainerRuntime>,
    default_tail: u32,
}

#[async_trait]
impl ToolHandler for FetchLogs {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: LogsInput = schema::parse_arguments(args)?;
        let logs = self
            .runtime
            .container_logs(&req.target, &req.query(self.default_tail))
            .await?;
        schema::to_output(&LogsOutput {
            target: req.target,
            logs,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>, defaults: &ContainerDefaults) -> Result<Tool> {
    Tool::new(
        "container.logs",
        "Fetch a snapshot of a container's logs. Defaults to the most recent lines; pass tail=0 for the full history.",
        schema::schema_of::<LogsInput>(),
        schema::schema_of::<LogsOutput>(),
        Arc::new(FetchLogs {
            runtime: Arc::clone(runtime),
            default_tail: defaults.log_tail,
        }),
    )
}

#[derive(Debug, Serialize, JsonSchema)]
struct FollowOutput {
    /// Token for session.read and session.close.
    session_id: String,
    target: String,
}

struct FollowLogs {
    runtime: Arc<dyn ContainerRuntime>,
    sessions: Arc<SessionManager>,
    default_tail: u32,
}

#[async_trait]
impl ToolHandler for FollowLogs {
    async fn call(&self, ctx: CallContext, args: Value) -> Result<Value> {
        let req: LogsInput = schema::parse_arguments(args)?;
        // All fallible work happens before the session exists, so an
        // error here never leaves an orphaned session behind.
        let stream = self
            .runtime
            .follow_logs(&req.target, &req.query(self.default_tail))
            .await?;
        let session_id = self.sessions.open(ctx.request_id, stream).await;
        schema::to_output(&FollowOutput {
            session_id,
            target: req.target,
        })
    }
}

pub fn follow_tool(
    runtime: &Arc<dyn ContainerRuntime>,
    sessions: &Arc<SessionManager>,
    defaults: &ContainerDefaults,
) -> Result<Tool> {
    Tool::new(
        "container.follow_logs",
        "Follow a container's logs as they are written. Returns a session id; pull chunks with session.read and release with session.close.",
        schema::schema_of::<LogsInput>(),
        schema::schema_of::<FollowOutput>(),
        Arc::new(FollowLogs {
            runtime: Arc::clone(runtime),
            sessions: Arc::clone(sessions),
            default_tail: defaults.log_tail,
        }),
    )
}
