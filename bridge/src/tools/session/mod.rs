//! session.* — streaming session access tools

pub mod close;
pub mod read;

use crate::error::Result;
use crate::registry::Registry;
use crate::session::SessionManager;
use std::sync::Arc;

pub fn register_tools(registry: &mut Registry, sessions: &Arc<SessionManager>) -> Result<()> {
    registry.register(read::tool(sessions)?)?;
    registry.register(close::tool(sessions)?)?;
    Ok(())
}
