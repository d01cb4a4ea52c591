//! MCP tools backed by the Kaizen API
//!
//! Every tool name maps to one variant of [`ToolName`], and every variant maps
//! to one handler. Handlers decode their own argument contract from the
//! generic `arguments` object, validate it, then call the executor.

pub mod akuma;
pub mod catalog;
pub mod enzan;
pub mod sozo;

pub use catalog::tool_definitions;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::{ApiObject, ExecutorError, RemoteExecutor};

/// Errors a tool handler can report
///
/// These never become JSON-RPC errors; the dispatcher turns them into a tool
/// result with `isError` set.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("schema or schemaName is required")]
    MissingSchema,

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: ToolName,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

/// The closed set of tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// Natural language to SQL
    AkumaQuery,
    /// Plain-English explanation of a SQL query
    AkumaExplain,
    /// Schema context used for query generation
    AkumaSchema,
    /// GPU spend and usage summary
    EnzanSummary,
    /// Current burn rate
    EnzanBurn,
    /// Synthetic tabular data generation
    SozoGenerate,
    /// Built-in synthetic data schema presets
    SozoSchemas,
}

impl ToolName {
    /// Every tool, in catalog order
    pub const ALL: [ToolName; 7] = [
        ToolName::AkumaQuery,
        ToolName::AkumaExplain,
        ToolName::AkumaSchema,
        ToolName::EnzanSummary,
        ToolName::EnzanBurn,
        ToolName::SozoGenerate,
        ToolName::SozoSchemas,
    ];

    /// Wire name used in `tools/list` and `tools/call`
    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::AkumaQuery => "akuma.query",
            ToolName::AkumaExplain => "akuma.explain",
            ToolName::AkumaSchema => "akuma.schema",
            ToolName::EnzanSummary => "enzan.summary",
            ToolName::EnzanBurn => "enzan.burn",
            ToolName::SozoGenerate => "sozo.generate",
            ToolName::SozoSchemas => "sozo.schemas",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tool name is not in the registry
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| UnknownTool(name.to_string()))
    }
}

/// Run one tool handler
pub async fn call_tool(
    executor: &dyn RemoteExecutor,
    tool: ToolName,
    arguments: ApiObject,
) -> Result<ApiObject, ToolError> {
    match tool {
        ToolName::AkumaQuery => akuma::query(executor, decode_args(tool, arguments)?).await,
        ToolName::AkumaExplain => akuma::explain(executor, decode_args(tool, arguments)?).await,
        ToolName::AkumaSchema => akuma::schema(executor, decode_args(tool, arguments)?).await,
        ToolName::EnzanSummary => enzan::summary(executor, decode_args(tool, arguments)?).await,
        ToolName::EnzanBurn => enzan::burn(executor).await,
        ToolName::SozoGenerate => sozo::generate(executor, decode_args(tool, arguments)?).await,
        ToolName::SozoSchemas => sozo::schemas(executor).await,
    }
}

/// Run one tool handler, failing with a timeout once `deadline` has passed
pub async fn call_tool_with_deadline(
    executor: &dyn RemoteExecutor,
    tool: ToolName,
    arguments: ApiObject,
    deadline: Duration,
) -> Result<ApiObject, ToolError> {
    match tokio::time::timeout(deadline, call_tool(executor, tool, arguments)).await {
        Ok(result) => result,
        Err(_) => Err(ToolError::Executor(ExecutorError::Timeout(deadline))),
    }
}

fn decode_args<T: DeserializeOwned>(tool: ToolName, arguments: ApiObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|source| ToolError::InvalidArguments { tool, source })
}

fn encode_payload<T: Serialize>(payload: &T) -> Result<Value, ToolError> {
    serde_json::to_value(payload).map_err(ToolError::Encode)
}

/// A non-blank string argument, or the matching `MissingArgument` error
fn require_text(field: &'static str, value: Option<&str>) -> Result<(), ToolError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(ToolError::MissingArgument(field)),
    }
}
