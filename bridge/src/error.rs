//! error — normalized failure taxonomy for the tool boundary

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Closed classification set. Every failure crossing the tool boundary
/// carries exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownTool,
    DuplicateTool,
    InvalidArgument,
    NotFound,
    Conflict,
    PermissionDenied,
    Unavailable,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownTool => "unknown_tool",
            ErrorKind::DuplicateTool => "duplicate_tool",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("duplicate tool: {0}")]
    DuplicateTool(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("runtime unavailable: {0}")]
    Unavailable(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::UnknownTool(_) => ErrorKind::UnknownTool,
            BridgeError::DuplicateTool(_) => ErrorKind::DuplicateTool,
            BridgeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BridgeError::NotFound(_) => ErrorKind::NotFound,
            BridgeError::Conflict(_) => ErrorKind::Conflict,
            BridgeError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            BridgeError::Unavailable(_) => ErrorKind::Unavailable,
            BridgeError::Timeout(_) => ErrorKind::Timeout,
            BridgeError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Retrying is only safe when the request may never have reached the
    /// runtime. Mutating operations must not be repeated for any other kind.
    pub fn retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unavailable | ErrorKind::Timeout)
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
