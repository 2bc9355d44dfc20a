//! container.start — Start a created or stopped container

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct StartInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct StartOutput {
    started: bool,
    target: String,
}

struct StartContainer {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for StartContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: StartInput = schema::parse_arguments(args)?;
        self.runtime.start_container(&req.target).await?;
        schema::to_output(&StartOutput {
            started: true,
            target: req.target,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.start",
        "Start a container that was created or has stopped.",
        schema::schema_of::<StartInput>(),
        schema::schema_of::<StartOutput>(),
        Arc::new(StartContainer {
            runtime: Arc::clone(runtime),
        }),
    )
}
