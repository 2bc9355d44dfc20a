//! container.remove — Delete a container

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
struct RemoveInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
    /// Remove even if the container is running.
    #[serde(default)]
    force: bool,
    /// Also remove anonymous volumes attached to the container.
    #[serde(default)]
    volumes: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
struct RemoveOutput {
    removed: bool,
    target: String,
}

struct RemoveContainer {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for RemoveContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: RemoveInput = schema::parse_arguments(args)?;
        self.runtime
            .remove_container(&req.target, req.force, req.volumes)
            .await?;
        schema::to_output(&RemoveOutput {
            removed: true,
            target: req.target,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.remove",
        "Remove a container. A running container is only removed when force is set.",
        schema::schema_of::<RemoveInput>(),
        schema::schema_of::<RemoveOutput>(),
        Arc::new(RemoveContainer {
            runtime: Arc::clone(runtime),
        }),
    )
}
