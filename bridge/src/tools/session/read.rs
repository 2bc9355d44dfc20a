//! session.read — Pull the next chunk from a streaming session

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::schema;
use crate::session::{ReadChunk, SessionManager};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct ReadInput {
    /// Session token from container.follow_logs or container.exec_attach.
    #[schemars(length(min = 1))]
    session_id: String,
    /// Upper bound on the chunk size, capped by server configuration.
    #[serde(default)]
    max_bytes: Option<usize>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ReadOutput {
    /// Chunk contents. Non-UTF-8 bytes are replaced.
    data: String,
    /// Size of the chunk before any replacement.
    bytes: usize,
    /// True once the stream is exhausted or the session is closed;
    /// data is empty in that case and further reads keep saying so.
    eof: bool,
}

struct ReadSession {
    sessions: Arc<SessionManager>,
}

#[async_trait]
impl ToolHandler for ReadSession {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: ReadInput = schema::parse_arguments(args)?;
        let output = match self
            .sessions
            .read_chunk(&req.session_id, req.max_bytes)
            .await
        {
            ReadChunk::Data(chunk) => ReadOutput {
                bytes: chunk.len(),
                data: String::from_utf8_lossy(&chunk).into_owned(),
                eof: false,
            },
            ReadChunk::EndOfStream => ReadOutput {
                data: String::new(),
                bytes: 0,
                eof: true,
            },
        };
        schema::to_output(&output)
    }
}

pub fn tool(sessions: &Arc<SessionManager>) -> Result<Tool> {
    Tool::new(
        "session.read",
        "Read the next chunk from a streaming session. Waits for data while the stream is live; returns eof=true once it is done.",
        schema::schema_of::<ReadInput>(),
        schema::schema_of::<ReadOutput>(),
        Arc::new(ReadSession {
            sessions: Arc::clone(sessions),
        }),
    )
}
