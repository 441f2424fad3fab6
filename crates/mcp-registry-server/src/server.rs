//! MCP over newline-delimited JSON-RPC.
//!
//! stdout carries protocol messages only; all diagnostics go through
//! `tracing` to stderr. Each request runs as its own task and responses are
//! funneled through a single writer so lines never interleave.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::jsonrpc::{error_codes, CallToolParams, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::tools::ToolRegistry;

/// Protocol revisions this server can speak, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Name and version reported in `initialize`.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug)]
pub struct McpServer {
    tools: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, info: ServerInfo) -> Self {
        Self { tools, info }
    }

    /// Handle one inbound line. `None` means nothing is written back
    /// (notifications and blank lines).
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let message: Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparsable JSON-RPC message");
                return Some(to_value(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                )));
            }
        };

        // Well-formed JSON that is not a request object.
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                return Some(to_value(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                )));
            }
        };

        self.handle_request(request).await.map(to_value)
    }

    async fn handle_request(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() {
            debug!(method = %req.method, "notification");
            return None;
        }
        let id = req.id.clone().unwrap_or(Value::Null);

        if req.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version '{}'", req.jsonrpc),
            ));
        }

        debug!(method = %req.method, "request");

        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::result(id, self.initialize(&req.params)),
            "ping" => JsonRpcResponse::result(id, json!({})),
            "tools/list" => JsonRpcResponse::result(id, json!({ "tools": self.tools.list() })),
            "tools/call" => self.call_tool(id, req.params).await,
            other => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize(&self, params: &Value) -> Value {
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let protocol_version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": { "name": self.info.name, "version": self.info.version },
        })
    }

    async fn call_tool(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                )
            }
        };

        match self.tools.call(&params.name, params.arguments).await {
            Some(body) => JsonRpcResponse::result(id, to_value(body)),
            None => JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            ),
        }
    }

    /// Serve until `reader` hits EOF, then wait for in-flight requests.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Value>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let server = Arc::clone(&self);
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    // Receiver only disappears if the writer failed; that is logged there.
                    let _ = tx.send(response);
                }
            });
        }
        drop(tx);

        writer_task
            .await
            .map_err(|e| std::io::Error::other(format!("writer task failed: {}", e)))?
    }

    /// Serve on the process's stdin/stdout.
    pub async fn run_stdio(self) -> std::io::Result<()> {
        Arc::new(self)
            .serve(tokio::io::stdin(), tokio::io::stdout())
            .await
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<Value>, mut writer: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        let mut line = message.to_string();
        line.push('\n');
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            error!(error = %e, "failed to write response");
            return Err(e);
        }
        writer.flush().await?;
    }
    Ok(())
}

fn to_value<T: serde::Serialize>(message: T) -> Value {
    serde_json::to_value(message).unwrap_or_else(|e| {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": null,
            "error": {
                "code": error_codes::INTERNAL_ERROR,
                "message": format!("failed to serialize response: {}", e),
            }
        })
    })
}
