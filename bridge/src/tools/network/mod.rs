//! network.* — read-only network tools

pub mod inspect;
pub mod list;

use crate::error::Result;
use crate::registry::Registry;
use crate::runtime::ContainerRuntime;
use std::sync::Arc;

pub fn register_tools(registry: &mut Registry, runtime: &Arc<dyn ContainerRuntime>) -> Result<()> {
    registry.register(list::tool(runtime)?)?;
    registry.register(inspect::tool(runtime)?)?;
    Ok(())
}
