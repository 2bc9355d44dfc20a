//! container.list — Enumerate containers known to the runtime

use crate::error::Result;
use crate::registry::{CallContext, Tool, ToolHandler};
use crate::runtime::types::{ContainerFilters, ContainerQuery, ContainerSummary};
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
    /// Include stopped containers, not just running ones.
    #[serde(default)]
    all: bool,
    /// Return at most this many rows.
    #[serde(default)]
    limit: Option<i32>,
    /// Keep only containers in this state (e.g. "running", "exited").
    #[serde(default)]
    status: Option<String>,
    /// Keep only containers whose name contains this value.
    #[serde(default)]
    name: Option<String>,
    /// Keep only containers whose id starts with this value.
    #[serde(default)]
    id: Option<String>,
    /// Keep only containers with this label ("key" or "key=value").
    #[serde(default)]
    label: Option<String>,
    /// Keep only containers created from this image.
    #[serde(default)]
    ancestor: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ListOutput {
    containers: Vec<ContainerSummary>,
    total_count: usize,
}

struct ListContainers {
    runtime: Arc<dyn ContainerRuntime>,
}

#[async_trait]
impl ToolHandler for ListContainers {
    async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
        let req: ListInput = schema::parse_arguments(args)?;
        let mut filters = ContainerFilters::default();
        if let Some(status) = req.status {
            filters.status.push(status);
        }
        if let Some(name) = req.name {
            filters.name.push(name);
        }
        if let Some(id) = req.id {
            filters.id.push(id);
        }
        if let Some(label) = req.label {
            filters.label.push(label);
        }
        if let Some(ancestor) = req.ancestor {
            filters.ancestor.push(ancestor);
        }
        let query = ContainerQuery {
            all: req.all,
            limit: req.limit,
            filters,
        };
        let containers = self.runtime.list_containers(&query).await?;
        schema::to_output(&ListOutput {
            total_count: containers.len(),
            containers,
        })
    }
}

pub fn tool(runtime: &Arc<dyn ContainerRuntime>) -> Result<Tool> {
    Tool::new(
        "container.list",
        "List containers, optionally including stopped ones and filtered by status, name, id, label, or image.",
        schema::schema_of::<ListInput>(),
        schema::schema_of::<ListOutput>(),
        Arc::new(ListContainers {
            runtime: Arc::clone(runtime),
        }),
    )
}
