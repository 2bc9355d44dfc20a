//! system.version — Runtime daemon version report

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::VersionInfo;
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct VersionInput {}

struct ShowVersion {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for ShowVersion {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let _req: VersionInput = schema::parse_arguments(args)?;
        let version = self.runtime.version().await?;
        schema::to_output(&version)
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "system.version",
        "Report the container runtime's version, API version, and platform.",
        schema::schema_of::<VersionInput>(),
        schema::schema_of::<VersionInfo>(),
        Arc::new(ShowVersion {
            runtime: Arc::clone(runtime),
        }),
    )
}
