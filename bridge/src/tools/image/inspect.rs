//! image.inspect — Detailed view of a single image

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::ImageDetailView;
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
    /// Image reference or id.
    #[schemars(length(min = 1))]
    target: String,
}

struct InspectImage {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for InspectImage {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: InspectInput = schema::parse_arguments(args)?;
        let detail = self.runtime.inspect_image(&req.target).await?;
        schema::to_output(&detail)
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "image.inspect",
        "Inspect one image by reference or id: tags, platform, size, and default config.",
        schema::schema_of::<InspectInput>(),
        schema::schema_of::<ImageDetailView>(),
        Arc::new(InspectImage {
            runtime: Arc::clone(runtime),
        }),
    )
}
