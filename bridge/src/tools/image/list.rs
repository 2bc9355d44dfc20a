//! image.list — Enumerate local images

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::{ImageQuery, ImageSummaryView};
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct ListInput {
    /// Include intermediate layers, not just tagged images.
    #[serde(default)]
    all: bool,
    /// Keep only images matching this reference (e.g. "nginx:*").
    #[serde(default)]
    reference: Option<String>,
    /// Keep only dangling (untagged) images when true.
    #[serde(default)]
    dangling: Option<bool>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ListOutput {
    images: Vec<ImageSummaryView>,
    count: usize,
}

struct ListImages {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for ListImages {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: ListInput = schema::parse_arguments(args)?;
        let query = ImageQuery {
            all: req.all,
            reference: req.reference,
            dangling: req.dangling,
        };
        let images = self.runtime.list_images(&query).await?;
        schema::to_output(&ListOutput {
            count: images.len(),
            images,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "image.list",
        "List images available to the runtime, optionally filtered by reference or dangling state.",
        schema::schema_of::<ListInput>(),
        schema::schema_of::<ListOutput>(),
        Arc::new(ListImages {
            runtime: Arc::clone(runtime),
        }),
    )
}
