//! container.create — Create a container from an image

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::CreateSpec;
use crate::runtime::ContainerRuntime;
use crate::schema;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct CreateInput {
    /// Image reference to create from (e.g. "nginx:latest").
    #[schemars(length(min = 1))]
    image: String,
    /// Name for the new container. Generated by the runtime if absent.
    #[serde(default)]
    name: Option<String>,
    /// Command to run instead of the image default.
    #[serde(default)]
    cmd: Vec<String>,
    /// Environment variables for the container process.
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    labels: HashMap<String, String>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct CreateOutput {
    /// Id assigned by the runtime.
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

struct CreateContainer {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for CreateContainer {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: CreateInput = schema::parse_arguments(args)?;
        let spec = CreateSpec {
            image: req.image,
            name: req.name,
            cmd: req.cmd,
            env: req.env,
            labels: req.labels,
        };
        let id = self.runtime.create_container(&spec).await?;
        schema::to_output(&CreateOutput {
            id,
            name: spec.name,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.create",
        "Create a container from an image without starting it. Returns the new container's id.",
        schema::schema_of::<CreateInput>(),
        schema::schema_of::<CreateOutput>(),
        Arc::new(CreateContainer {
            runtime: Arc::clone(runtime),
        }),
    )
}
