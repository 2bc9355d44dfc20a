//! Dispatch Engine — runs tool calls through lookup, validation, and
//! guarded execution
//!
//! Every call produces exactly one outcome: success, or a failure that
//! carries the taxonomy kind and the retryable flag. Handlers run on
//! their own task so a panic or an overrun budget never takes the
//! dispatcher down with it. The engine never retries anything itself;
//! the retryable flag is advice for the caller, and mutating operations
//! in particular are only ever attempted once per call.

use crate::error::{BridgeError, ErrorKind};
use crate::registry::{CallContext, Registry};
use crate::session::SessionManager;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// One tool invocation as received from the protocol boundary.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

/// Terminal result of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success {
        content: Value,
    },
    Failure {
        kind: ErrorKind,
        message: String,
        retryable: bool,
    },
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success { .. })
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ToolOutcome::Success { .. } => None,
            ToolOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<BridgeError> for ToolOutcome {
    fn from(err: BridgeError) -> Self {
        ToolOutcome::Failure {
            kind: err.kind(),
            retryable: err.retryable(),
            message: err.to_string(),
        }
    }
}

pub struct Dispatcher {
    registry: Arc<Registry>,
    sessions: Arc<SessionManager>,
    default_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry>,
        sessions: Arc<SessionManager>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            sessions,
            default_timeout,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Run one call under the configured per-request budget.
    pub async fn dispatch(&self, call: ToolCall) -> ToolOutcome {
        self.dispatch_with_timeout(call, self.default_timeout).await
    }

    /// Run one call under an explicit budget. The budget covers handler
    /// execution only, not lookup or validation, which are immediate.
    pub async fn dispatch_with_timeout(&self, call: ToolCall, budget: Duration) -> ToolOutcome {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        // 1. Resolve the tool; unknown names are rejected before any
        //    argument is looked at.
        let tool = match self.registry.lookup(&call.name) {
            Ok(tool) => tool,
            Err(err) => {
                warn!("Rejected: tool={} error={}", call.name, err);
                return err.into();
            }
        };

        // 2. Validate arguments against the tool's input schema. The
        //    first offending field is reported; the handler never sees
        //    invalid input.
        if let Err(err) = tool.validate(&call.arguments) {
            warn!("Rejected: tool={} error={}", call.name, err);
            return err.into();
        }

        // 3. Invoke on a dedicated task under the budget. The task
        //    boundary contains panics; the timeout aborts the task and
        //    reaps any session it managed to open.
        info!("Invoking: tool={} request_id={}", call.name, request_id);
        let ctx = CallContext { request_id };
        let handler = tool.handler();
        let mut handle = tokio::spawn(async move { handler.call(ctx, call.arguments).await });

        let outcome = match tokio::time::timeout(budget, &mut handle).await {
            Ok(Ok(Ok(content))) => ToolOutcome::Success { content },
            Ok(Ok(Err(err))) => err.into(),
            Ok(Err(join_err)) => {
                if join_err.is_panic() {
                    warn!("Panicked: tool={} request_id={}", call.name, request_id);
                } else {
                    warn!("Cancelled: tool={} request_id={}", call.name, request_id);
                }
                self.sessions.close_owned(request_id).await;
                BridgeError::Internal(format!("tool '{}' aborted mid-flight", call.name)).into()
            }
            Err(_) => {
                handle.abort();
                self.sessions.close_owned(request_id).await;
                BridgeError::Timeout(budget).into()
            }
        };

        match &outcome {
            ToolOutcome::Success { .. } => {
                info!(
                    "Completed: tool={} request_id={} duration_ms={}",
                    call.name,
                    request_id,
                    start.elapsed().as_millis()
                );
            }
            ToolOutcome::Failure { kind, message, .. } => {
                warn!(
                    "Failed: tool={} request_id={} kind={} error={} duration_ms={}",
                    call.name,
                    request_id,
                    kind,
                    message,
                    start.elapsed().as_millis()
                );
            }
        }
        outcome
    }
}
