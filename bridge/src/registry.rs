//! Tool Registry — fixed catalog of callable tools
//!
//! The registry is populated once at startup and read-only afterwards.
//! Listing preserves registration order so clients see a stable catalog
//! across calls and across processes built from the same tool set.

use crate::error::{BridgeError, Result};
use crate::schema;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Per-invocation context handed to a handler alongside its arguments.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    /// Correlation id of the request being served. Sessions opened by a
    /// handler are tagged with it so they can be reaped if the request
    /// is cut short.
    pub request_id: Uuid,
}

/// A tool's behavior. Implementations receive arguments that already
/// passed the tool's input schema.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: CallContext, args: Value) -> Result<Value>;
}

/// Immutable tool descriptor: metadata, schemas, the compiled argument
/// validator, and the handler.
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
    validator: jsonschema::Validator,
    handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish_non_exhaustive()
    }
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        output_schema: Value,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<Self> {
        let validator = schema::compile(&input_schema)?;
        Ok(Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
            validator,
            handler,
        })
    }

    /// Check arguments against the input schema, reporting the first
    /// offending field.
    pub fn validate(&self, args: &Value) -> Result<()> {
        schema::validate_arguments(&self.validator, args)
    }

    pub fn handler(&self) -> Arc<dyn ToolHandler> {
        Arc::clone(&self.handler)
    }
}

#[derive(Default)]
pub struct Registry {
    tools: Vec<Arc<Tool>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool under its unique name. Names are case-sensitive exact
    /// identifiers; a second registration of the same name is rejected
    /// and leaves the original untouched.
    pub fn register(&mut self, tool: Tool) -> Result<()> {
        if self.index.contains_key(&tool.name) {
            return Err(BridgeError::DuplicateTool(tool.name.clone()));
        }
        info!("Registered tool: {}", tool.name);
        self.index.insert(tool.name.clone(), self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    /// Resolve a tool by exact name.
    pub fn lookup(&self, name: &str) -> Result<Arc<Tool>> {
        self.index
            .get(name)
            .map(|&slot| Arc::clone(&self.tools[slot]))
            .ok_or_else(|| BridgeError::UnknownTool(name.to_string()))
    }

    /// All tools in registration order. The iterator can be restarted by
    /// calling this again; the order never changes after startup.
    pub fn list(&self) -> impl Iterator<Item = &Arc<Tool>> {
        self.tools.iter()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    struct EchoHandler;

    #[async_trait]
    impl ToolHandler for EchoHandler {
        async fn call(&self, _ctx: CallContext, args: Value) -> Result<Value> {
            Ok(args)
        }
    }

    fn sample_tool(name: &str) -> Tool {
        Tool::new(
            name,
            format!("{name} test tool"),
            json!({
                "type": "object",
                "properties": { "target": { "type": "string" } },
                "required": ["target"],
                "additionalProperties": false
            }),
            json!({ "type": "object" }),
            Arc::new(EchoHandler),
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry.register(sample_tool("container.list")).unwrap();

        let tool = registry.lookup("container.list").unwrap();
        assert_eq!(tool.name, "container.list");
        assert_eq!(tool.description, "container.list test tool");
    }

    #[test]
    fn test_lookup_unknown_tool() {
        let registry = Registry::new();
        let err = registry.lookup("no.such.tool").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTool);
        assert!(!err.retryable());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = Registry::new();
        registry.register(sample_tool("container.list")).unwrap();
        let err = registry.lookup("Container.List").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTool);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = Registry::new();
        registry.register(sample_tool("container.stop")).unwrap();

        let mut dup = sample_tool("container.stop");
        dup.description = "impostor".to_string();
        let err = registry.register(dup).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateTool);

        // the original registration survives intact
        assert_eq!(registry.tool_count(), 1);
        let tool = registry.lookup("container.stop").unwrap();
        assert_eq!(tool.description, "container.stop test tool");
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = Registry::new();
        for name in ["zeta.last", "alpha.first", "mid.dle"] {
            registry.register(sample_tool(name)).unwrap();
        }

        let names: Vec<&str> = registry.list().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta.last", "alpha.first", "mid.dle"]);

        // restarting the iterator yields the same order
        let again: Vec<&str> = registry.list().map(|t| t.name.as_str()).collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_tool_count() {
        let mut registry = Registry::new();
        assert_eq!(registry.tool_count(), 0);
        registry.register(sample_tool("a.one")).unwrap();
        registry.register(sample_tool("a.two")).unwrap();
        assert_eq!(registry.tool_count(), 2);
    }

    #[test]
    fn test_register_many_tools() {
        let mut registry = Registry::new();
        for i in 0..100 {
            registry.register(sample_tool(&format!("tool.{i}"))).unwrap();
        }
        assert_eq!(registry.tool_count(), 100);
        assert_eq!(
            registry.lookup("tool.57").unwrap().name,
            "tool.57"
        );
        let names: Vec<String> = registry.list().map(|t| t.name.clone()).collect();
        assert_eq!(names[0], "tool.0");
        assert_eq!(names[99], "tool.99");
    }

    #[test]
    fn test_tool_validate_rejects_bad_arguments() {
        let tool = sample_tool("container.inspect");
        assert!(tool.validate(&json!({ "target": "web" })).is_ok());

        let err = tool.validate(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = tool.validate(&json!({ "target": 7 })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_tool_rejects_unloadable_schema() {
        let err = Tool::new(
            "bad.schema",
            "broken",
            json!({ "type": 12 }),
            json!({ "type": "object" }),
            Arc::new(EchoHandler),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
