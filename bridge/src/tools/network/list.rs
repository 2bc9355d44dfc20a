//! network.list — Enumerate networks

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::NetworkView;
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct ListInput {}

#[derive(Debug, Serialize, JsonSchema)]
struct ListOutput {
    networks: Vec<NetworkView>,
    count: usize,
}

struct ListNetworks {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for ListNetworks {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let _req: ListInput = schema::parse_arguments(args)?;
        let networks = self.runtime.list_networks().await?;
        schema::to_output(&ListOutput {
            count: networks.len(),
            networks,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "network.list",
        "List networks known to the runtime.",
        schema::schema_of::<ListInput>(),
        schema::schema_of::<ListOutput>(),
        Arc::new(ListNetworks {
            runtime: Arc::clone(runtime),
        }),
    )
}
