//! container.stop — Stop a running container

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
struct StopInput {
    /// Container name or id.
    #[schemars(length(min = 1))]
    target: String,
    /// Seconds to wait before the runtime kills the container.
    #[serde(default)]
    timeout: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct StopOutput {
    stopped: bool,
    target: String,
}

struct StopContainer {
    runtime: Arc<dyn ContainerRuntime>,
    stop_timeout: u32,
}

#[async_trait]
impl ToolHandler for StopContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: StopInput = schema::parse_arguments(args)?;
        let timeout = req.timeout.unwrap_or(self.stop_timeout);
        self.runtime.stop_container(&req.target, timeout).await?;
        schema::to_output(&StopOutput {
            stopped: true,
            target: req.target,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>, defaults: &ContainerDefaults) -> Result<Tool> {
    Tool::new(
        "container.stop",
        "Stop a running container, giving it a grace period before it is killed.",
        schema::schema_of::<StopInput>(),
        schema::schema_of::<StopOutput>(),
        Arc::new(StopContainer {
            runtime: Arc::clone(runtime),
            stop_timeout: defaults.stop_timeout_seconds,
        }),
    )
}
