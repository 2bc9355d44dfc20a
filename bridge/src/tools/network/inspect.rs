//! network.inspect — Detailed view of a single network

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::NetworkView;
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
    /// Network name or id.
    #[schemars(length(min = 1))]
    target: String,
}

struct InspectNetwork {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for InspectNetwork {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: InspectInput = schema::parse_arguments(args)?;
        let network = self.runtime.inspect_network(&req.target).await?;
        schema::to_output(&network)
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "network.inspect",
        "Inspect one network by name or id: driver, subnets, and attached containers.",
        schema::schema_of::<InspectInput>(),
        schema::schema_of::<NetworkView>(),
        Arc::new(InspectNetwork {
            runtime: Arc::clone(runtime),
        }),
    )
}
