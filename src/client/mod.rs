//! Remote operation executor
//!
//! Tool handlers never talk HTTP directly; they go through the
//! [`RemoteExecutor`] trait so the dispatcher can be exercised against a fake
//! backend in tests while production uses [`KaizenApiClient`].

pub mod http;

pub use http::KaizenApiClient;

use std::time::Duration;

use async_trait::async_trait;
pub use reqwest::Method;
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded JSON object returned by the Kaizen API
pub type ApiObject = Map<String, Value>;

/// Errors that can occur while executing a remote operation
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("KAIZEN_API_KEY is not set")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{message} (status={status})")]
    Api { message: String, status: u16 },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Trait defining how tool handlers reach the backend
///
/// Implementations are shared read-only for the lifetime of the process.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Perform `method path` with an optional JSON body
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<ApiObject, ExecutorError>;
}
