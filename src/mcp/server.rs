//! MCP server implementation that handles JSON-RPC communication
//!
//! This module implements the serve loop that:
//! 1. Reads framed JSON-RPC requests from stdin
//! 2. Dispatches protocol methods and tool calls
//! 3. Writes framed JSON-RPC responses to stdout
//!
//! Requests are handled strictly one at a time: a response is flushed before
//! the next frame is read.

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::framing::{FrameReader, FrameWriter};
use crate::mcp::protocol::*;
use crate::tools::{self, ToolName};
use crate::{KaizenServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    /// Shared context: configuration and the remote executor
    kaizen: KaizenServer,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(kaizen: KaizenServer) -> Self {
        Self { kaizen }
    }

    /// Run the MCP server over the process stdin/stdout
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve requests from `reader`, writing responses to `writer`
    ///
    /// Returns `Ok(())` on a clean end of stream. Framing and write failures
    /// end the loop with an error; undecodable messages are skipped.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FrameReader::new(reader);
        let mut out = FrameWriter::new(writer);

        loop {
            let payload = match frames.next_frame().await {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    info!("MCP server shutting down (stdin closed)");
                    return Ok(());
                }
                Err(e) => {
                    error!("Failed to read message: {}", e);
                    return Err(e.into());
                }
            };

            if let Some(response) = self.handle_message(&payload).await {
                out.write_response(&response).await?;
                debug!("Sent response for id {}", response.id);
            }
        }
    }

    /// Decode and handle one frame payload
    ///
    /// Returns the response to send, if any.
    pub async fn handle_message(&self, payload: &[u8]) -> Option<JsonRpcResponse> {
        let request = match JsonRpcRequest::from_slice(payload) {
            Ok(req) => req,
            Err(e) => {
                warn!("Dropping invalid JSON-RPC payload: {}", e);
                return None;
            }
        };

        self.handle_request(request).await
    }

    /// Handle a decoded JSON-RPC request
    ///
    /// Requests without an id never get a response, whatever the method.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Processing request: {}", request.method);

        let outcome = match request.method.as_str() {
            "notifications/initialized" | "initialized" => return None,
            "initialize" => self.handle_initialize(),
            "ping" => ResponseOutcome::Result(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,
            _ => ResponseOutcome::Error(JsonRpcError::new(
                ErrorCode::MethodNotFound,
                "method not found",
                Some(Value::String(request.method.clone())),
            )),
        };

        let id = request.id?;
        Some(JsonRpcResponse::new(id, outcome))
    }

    /// Handle MCP initialization request
    fn handle_initialize(&self) -> ResponseOutcome {
        info!("MCP client connected");
        to_outcome(&InitializeResult::current())
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> ResponseOutcome {
        ResponseOutcome::Result(json!({ "tools": tools::tool_definitions() }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: Option<Value>) -> ResponseOutcome {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return ResponseOutcome::Error(JsonRpcError::new(
                        ErrorCode::InvalidParams,
                        "invalid tool call params",
                        Some(Value::String(e.to_string())),
                    ));
                }
            },
            None => {
                return ResponseOutcome::Error(JsonRpcError::new(
                    ErrorCode::InvalidParams,
                    "invalid tool call params",
                    Some(Value::String("missing params".to_string())),
                ));
            }
        };

        let tool: ToolName = match tool_params.name.parse() {
            Ok(tool) => tool,
            Err(_) => {
                return ResponseOutcome::Error(JsonRpcError::new(
                    ErrorCode::InvalidParams,
                    "unknown tool",
                    Some(Value::String(tool_params.name)),
                ));
            }
        };

        let result = tools::call_tool_with_deadline(
            self.kaizen.executor(),
            tool,
            tool_params.arguments.unwrap_or_default(),
            self.kaizen.config().tool_timeout,
        )
        .await;

        let result = match result {
            Ok(data) => ToolCallResult::success(data),
            Err(e) => {
                warn!("Tool {} failed: {}", tool, e);
                ToolCallResult::error(e.to_string())
            }
        };

        to_outcome(&result)
    }
}

fn to_outcome<T: Serialize>(value: &T) -> ResponseOutcome {
    match serde_json::to_value(value) {
        Ok(result) => ResponseOutcome::Result(result),
        Err(e) => ResponseOutcome::Error(JsonRpcError::new(
            ErrorCode::InternalError,
            "failed to serialize result",
            Some(Value::String(e.to_string())),
        )),
    }
}
