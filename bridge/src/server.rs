//! Stdio server loop — newline-delimited JSON-RPC frames
//!
//! Requests are served concurrently: each one runs on its own task and
//! finished responses funnel through a single writer task, so frames
//! never interleave mid-line even when completions arrive out of order.
//! stdout carries frames only; all diagnostics go to stderr via tracing.

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Serve MCP over this process's stdin/stdout until stdin closes.
pub async fn serve(server: Arc<McpServer>) -> anyhow::Result<()> {
    serve_io(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve MCP over arbitrary byte streams. Decoupled from process stdio
/// so embedders and tests can drive the full stack through any
/// transport.
pub async fn serve_io<R, W>(server: Arc<McpServer>, input: R, output: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(64);

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(response) = rx.recv().await {
            let mut line = match serde_json::to_string(&response) {
                Ok(line) => line,
                Err(err) => {
                    error!("Response serialization failed: {err}");
                    continue;
                }
            };
            line.push('\n');
            if let Err(err) = output.write_all(line.as_bytes()).await {
                error!("Output write failed: {err}");
                break;
            }
            if let Err(err) = output.flush().await {
                error!("Output flush failed: {err}");
                break;
            }
        }
    });

    info!("Serving MCP requests");
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                error!("Failed to parse request: {err}");
                let response = JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::new(JsonRpcError::PARSE_ERROR, err.to_string()),
                );
                if tx.send(response).await.is_err() {
                    break;
                }
                continue;
            }
        };

        if request.jsonrpc != "2.0" {
            error!("Invalid JSON-RPC version: {}", request.jsonrpc);
            if !request.id.is_null() {
                let response = JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::new(JsonRpcError::INVALID_REQUEST, "Invalid JSON-RPC version"),
                );
                if tx.send(response).await.is_err() {
                    break;
                }
            }
            continue;
        }

        debug!("Received: method={} id={:?}", request.method, request.id);
        let server = Arc::clone(&server);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.handle_request(request).await {
                // writer gone means we are shutting down
                let _ = tx.send(response).await;
            }
        });
    }

    info!("Input closed, shutting down");
    drop(tx);
    server.dispatcher().sessions().shutdown().await;
    // writer drains responses from still-running request tasks
    let _ = writer.await;
    Ok(())
}
