//! container.restart — Stop and start a container in one step

use crate::config::ContainerDefaults;
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
struct RestartInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
    /// Seconds to wait for the stop phase before the runtime kills it.
    #[serde(default)]
    timeout: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct RestartOutput {
    restarted: bool,
    target: String,
}

struct RestartContainer {
    runtime: Arc<dyn ContainerRuntime>,
    stop_timeout: u32,
}

#[async_trait]
impl ToolHandler for RestartContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: RestartInput = schema::parse_arguments(args)?;
        let timeout = req.timeout.unwrap_or(self.stop_timeout);
        self.runtime.restart_container(&req.target, timeout).await?;
        schema::to_output(&RestartOutput {
            restarted: true,
            target: req.target,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>, defaults: &ContainerDefaults) -> Result<Tool> {
    Tool::new(
        "container.restart",
        "Restart a container, stopping it first if it is running.",
        schema::schema_of::<RestartInput>(),
        schema::schema_of::<RestartOutput>(),
        Arc::new(RestartContainer {
            runtime: Arc::clone(runtime),
            stop_timeout: defaults.stop_timeout_seconds,
        }),
    )
}
