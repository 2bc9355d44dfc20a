//! session.close — Release a streaming session

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::schema;
use crate::session::SessionManager;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct CloseInput {
    /// Session token to close. Closing an unknown or already-closed
    /// session succeeds and does nothing.
    #[schemars(length(min = 1))]
    session_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct CloseOutput {
    closed: bool,
    session_id: String,
}

struct CloseSession {
    sessions: Arc<SessionManager>,
}

#[async_trait]
impl ToolHandler for CloseSession {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: CloseInput = schema::parse_arguments(args)?;
        self.sessions.close(&req.session_id).await;
        schema::to_output(&CloseOutput {
            closed: true,
            session_id: req.session_id,
        })
    }
}

pub fn tool(sessions: &Arc<SessionManager>) -> Result<Tool> {
    Tool::new(
        "session.close",
        "Close a streaming session and release its runtime-side resources. Safe to call more than once.",
        schema::schema_of::<CloseInput>(),
        schema::schema_of::<CloseOutput>(),
        Arc::new(CloseSession {
            sessions: Arc::clone(sessions),
        }),
    )
}
