//! Public library interface for the Kaizen MCP server
//!
//! This crate exposes the Kaizen Akuma, Enzan and Sozo APIs as MCP tools over
//! stdio. The library exports the server context, the serve loop and the
//! framing/protocol types so they can be driven from tests or other binaries.

use thiserror::Error;

pub mod client;
pub mod config;
pub mod mcp;
pub mod tools;

// Re-export public modules and types
pub use client::{ApiObject, ExecutorError, KaizenApiClient, Method, RemoteExecutor};
pub use config::Config;
pub use mcp::framing::{FrameReader, FrameWriter, FramingError};
pub use mcp::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ResponseOutcome};
pub use mcp::McpServer;
pub use tools::{ToolError, ToolName};

/// Errors that can end the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("API client error: {0}")]
    Executor(#[from] ExecutorError),
}

/// Long-lived server context
///
/// Built once at startup and owned by the [`McpServer`]; holds the
/// configuration and the executor shared by every tool call.
pub struct KaizenServer {
    config: Config,
    executor: Box<dyn RemoteExecutor>,
}

impl KaizenServer {
    /// Create a server talking to the Kaizen API described by `config`
    pub fn new(config: Config) -> Result<Self, ServerError> {
        tracing::info!("Initializing Kaizen MCP server against {}", config.api_base_url);
        if config.api_key.is_none() {
            tracing::warn!("KAIZEN_API_KEY is not set; tool calls will fail until it is provided");
        }

        let client = KaizenApiClient::new(&config)?;
        Ok(Self::with_executor(config, client))
    }

    /// Create a server backed by a custom executor
    pub fn with_executor<E>(config: Config, executor: E) -> Self
    where
        E: RemoteExecutor + 'static,
    {
        Self {
            config,
            executor: Box::new(executor),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or a framing error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let mcp_server = McpServer::new(self);
        mcp_server.run().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the remote executor
    pub fn executor(&self) -> &dyn RemoteExecutor {
        self.executor.as_ref()
    }
}
