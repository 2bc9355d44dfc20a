//! system.* — runtime daemon tools

pub mod version;

use crate::error::Result;
use crate::registry::Registry;
use crate::runtime::ContainerRuntime;
use std::sync::Arc;

pub fn register_tools(registry: &mut Registry, runtime: &Arc<dyn ContainerRuntime>) -> Result<()> {
    registry.register(version::tool(runtime)?)?;
    Ok(())
}
