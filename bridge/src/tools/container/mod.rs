//! container.* — lifecycle, logs, and exec tools

pub mod create;
pub mod exec;
pub mod inspect;
pub mod list;
pub mod logs;
pub mod remove;
pub mod restart;
pub mod start;
pub mod stop;

use crate::config::ContainerDefaults;
use crate::error::Result;
use crate::registry::Registry;
use crate::runtime::ContainerRuntime;
use crate::session::SessionManager;
use std::sync::Arc;

pub fn register_tools(
    registry: &mut Registry,
    runtime: &Arc<dyn ContainerRuntime>,
    sessions: &Arc<SessionManager>,
    defaults: &ContainerDefaults,
) -> Result<()> {
    registry.register(list::tool(runtime)?)?;
    registry.register(inspect::tool(runtime)?)?;
    registry.register(create::tool(runtime)?)?;
    registry.register(start::tool(runtime)?)?;
    registry.register(stop::tool(runtime, defaults)?)?;
    registry.register(restart::tool(runtime, defaults)?)?;
    registry.register(remove::tool(runtime)?)?;
    registry.register(logs::tool(runtime, defaults)?)?;
    registry.register(logs::follow_tool(runtime, sessions, defaults)?)?;
    registry.register(exec::tool(runtime)?)?;
    registry.register(exec::attach_tool(runtime, sessions)?)?;
    Ok(())
}
