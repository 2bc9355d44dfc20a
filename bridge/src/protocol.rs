//! Protocol adapter — MCP JSON-RPC 2.0 over stdio frames
//!
//! Translates between the wire protocol and the dispatch engine. Tool
//! failures ride inside `tools/call` results with `isError` set and the
//! structured `{kind, message, retryable}` payload; JSON-RPC errors are
//! reserved for envelope problems (parse failures, unknown methods,
//! malformed params).

use crate::dispatch::{Dispatcher, ToolCall, ToolOutcome};
use crate::prompts::PromptCatalog;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

pub const PROTOCOL_VERSION: &str = "2025-06-18";

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct PromptGetParams {
    name: String,
    #[serde(default)]
    arguments: HashMap<String, String>,
}

/// Server-side protocol state: the dispatcher, the prompt catalog, and
/// whether the initialize handshake happened yet.
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    prompts: PromptCatalog,
    initialized: AtomicBool,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            prompts: PromptCatalog::new(),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Handle one request. Notifications (null id) produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.id.is_null();
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,
            "prompts/list" => self.handle_prompts_list(),
            "prompts/get" => self.handle_prompts_get(request.params),
            other => Err(JsonRpcError::new(
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        };

        if is_notification {
            if let Err(err) = result {
                debug!("Notification failed: method={} error={}", request.method, err.message);
            }
            return None;
        }

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(err) => JsonRpcResponse::error(request.id, err),
        })
    }

    fn handle_initialize(&self) -> Result<Value, JsonRpcError> {
        self.initialized.store(true, Ordering::Relaxed);
        info!("Client initialized");
        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "prompts": { "listChanged": false }
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let tools: Vec<Value> = self
            .dispatcher
            .registry()
            .list()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                    "outputSchema": tool.output_schema
                })
            })
            .collect();
        Ok(json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = serde_json::from_value(params).map_err(|err| {
            JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid params: {err}"))
        })?;
        // lenient on handshake order, but worth a trace
        if !self.initialized.load(Ordering::Relaxed) {
            debug!("tools/call before initialize handshake");
        }
        let arguments = if params.arguments.is_null() {
            json!({})
        } else {
            params.arguments
        };
        let outcome = self
            .dispatcher
            .dispatch(ToolCall {
                name: params.name,
                arguments,
            })
            .await;
        Ok(outcome_to_result(outcome))
    }

    fn handle_prompts_list(&self) -> Result<Value, JsonRpcError> {
        let prompts: Vec<Value> = self
            .prompts
            .list()
            .map(|prompt| {
                let arguments: Vec<Value> = prompt
                    .arguments
                    .iter()
                    .map(|arg| {
                        json!({
                            "name": arg.name,
                            "description": arg.description,
                            "required": arg.required
                        })
                    })
                    .collect();
                json!({
                    "name": prompt.name,
                    "title": prompt.title,
                    "description": prompt.description,
                    "arguments": arguments
                })
            })
            .collect();
        Ok(json!({ "prompts": prompts }))
    }

    fn handle_prompts_get(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: PromptGetParams = serde_json::from_value(params).map_err(|err| {
            JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid params: {err}"))
        })?;
        let (description, messages) = self
            .prompts
            .get(&params.name, &params.arguments)
            .ok_or_else(|| {
                JsonRpcError::new(
                    JsonRpcError::INVALID_PARAMS,
                    format!("Unknown prompt: {}", params.name),
                )
            })?;
        let messages: Vec<Value> = messages
            .into_iter()
            .map(|m| {
                json!({
                    "role": m.role,
                    "content": { "type": "text", "text": m.text }
                })
            })
            .collect();
        Ok(json!({ "description": description, "messages": messages }))
    }
}

/// Shape a dispatch outcome as an MCP tool result.
fn outcome_to_result(outcome: ToolOutcome) -> Value {
    match outcome {
        ToolOutcome::Success { content } => {
            let text = match serde_json::to_string_pretty(&content) {
                Ok(text) => text,
                Err(_) => content.to_string(),
            };
            json!({
                "content": [{ "type": "text", "text": text }],
                "structuredContent": content,
                "isError": false
            })
        }
        ToolOutcome::Failure {
            kind,
            message,
            retryable,
        } => {
            json!({
                "content": [{ "type": "text", "text": message }],
                "structuredContent": {
                    "kind": kind,
                    "message": message,
                    "retryable": retryable
                },
                "isError": true
            })
        }
    }
}
