//! container.inspect — Detailed view of a single container

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::ContainerDetail;
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct InspectInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
}

struct InspectContainer {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for InspectContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: InspectInput = schema::parse_arguments(args)?;
        let detail = self.runtime.inspect_container(&req.target).await?;
        schema::to_output(&detail)
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.inspect",
        "Inspect one container by name or id: state, config, networks, mounts, and ports.",
        schema::schema_of::<InspectInput>(),
        schema::schema_of::<ContainerDetail>(),
        Arc::new(InspectContainer {
            runtime: Arc::clone(runtime),
        }),
    )
}
