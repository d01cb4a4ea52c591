//! MCP (Model Context Protocol) message structures and JSON-RPC handling
//!
//! This module defines the JSON-RPC envelopes exchanged with MCP clients,
//! plus the MCP-specific payloads (initialize, tool listing, tool results).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC version tag carried by every response
pub const JSONRPC_VERSION: &str = "2.0";

/// Server name reported from `initialize`
pub const SERVER_NAME: &str = "kaizen-mcp";

/// Server version reported from `initialize`
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC 2.0 request message
///
/// The identifier is kept as an opaque JSON value. `None` means the field was
/// absent (a notification); an explicit `"id": null` decodes as
/// `Some(Value::Null)` and still gets a response.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (expected to be "2.0", not enforced)
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Identifier of this request, absent for notifications
    #[serde(default, deserialize_with = "present_value")]
    pub id: Option<Value>,
    /// The method to call (e.g., "tools/call")
    #[serde(default)]
    pub method: String,
    /// Parameters for the method call
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Decode a request from a raw frame payload
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Whether the sender expects a response
    pub fn expects_response(&self) -> bool {
        self.id.is_some()
    }
}

// `Option<Value>` would fold an explicit null into `None`; wrapping every
// present value keeps "absent" and "null" apart.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response message
///
/// Exactly one of `result` / `error` is present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result or error information
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
}

/// The payload half of a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseOutcome {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(JsonRpcError),
}

/// JSON-RPC error information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC error codes used by this server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The requested method doesn't exist
    MethodNotFound,
    /// Method exists but parameters are wrong (also used for unknown tools)
    InvalidParams,
    /// Internal JSON-RPC error
    InternalError,
}

impl ErrorCode {
    /// Numeric value sent on the wire
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }
}

impl JsonRpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data,
        }
    }
}

impl JsonRpcResponse {
    /// Create a response for the given outcome
    pub fn new(id: Value, outcome: ResponseOutcome) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome,
        }
    }

    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self::new(id, ResponseOutcome::Result(result))
    }

    /// Create an error response
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self::new(id, ResponseOutcome::Error(error))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            ResponseOutcome::Result(value) => Some(value),
            ResponseOutcome::Error(_) => None,
        }
    }

    pub fn error_info(&self) -> Option<&JsonRpcError> {
        match &self.outcome {
            ResponseOutcome::Result(_) => None,
            ResponseOutcome::Error(error) => Some(error),
        }
    }
}

/// MCP tool call parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "akuma.query")
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// MCP tool call result
///
/// A failed tool run is still a successful JSON-RPC response; the failure is
/// flagged by `isError`.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    /// Tool execution results
    pub content: Vec<ToolContent>,
    /// Decoded payload returned by the backend
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Map<String, Value>>,
    /// Whether this is an error result
    #[serde(rename = "isError", skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Type of content (always "text" here)
    #[serde(rename = "type")]
    pub content_type: String,
    /// The actual content/result
    pub text: String,
}

/// MCP tool definition
#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    /// Tool name (e.g., "akuma.query")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the tool's input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// MCP server capabilities
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// Tools that this server provides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability information
#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    /// The tool catalog is static, so this is always false
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// MCP protocol version we support
    pub protocol_version: String,
    /// Our server capabilities
    pub capabilities: ServerCapabilities,
    /// Information about our server
    pub server_info: ServerInfo,
}

/// Information about this server
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResult {
    /// The fixed document returned for every `initialize` call
    pub fn current() -> Self {
        Self {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        }
    }
}

impl ToolCallResult {
    /// Wrap a backend payload as pretty-printed text plus structured content
    pub fn success(data: Map<String, Value>) -> Self {
        let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string());
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            structured_content: Some(data),
            is_error: false,
        }
    }

    /// Create a failed tool result carrying a human-readable message
    pub fn error(error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: error_message,
            }],
            structured_content: None,
            is_error: true,
        }
    }
}
