//! reqwest-backed executor for the Kaizen API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiObject, ExecutorError, Method, RemoteExecutor};
use crate::config::Config;
use crate::mcp::protocol::{SERVER_NAME, SERVER_VERSION};

/// Upper bound on a single HTTP exchange
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_API_ERROR: &str = "Kaizen API request failed";

/// Authenticated client for the Kaizen REST API
pub struct KaizenApiClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl KaizenApiClient {
    /// Build a client from the server configuration
    ///
    /// A missing API key is not an error here; every call fails instead.
    pub fn new(config: &Config) -> Result<Self, ExecutorError> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteExecutor for KaizenApiClient {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<ApiObject, ExecutorError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ExecutorError::MissingApiKey),
        };

        let url = format!("{}{}", self.base_url, path);
        debug!("Kaizen API {} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(api_key)
            .header(USER_AGENT, format!("{}/{}", SERVER_NAME, SERVER_VERSION));
        if let Some(body) = payload {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            let message = serde_json::from_slice::<ApiObject>(&body)
                .ok()
                .and_then(|decoded| match decoded.get("error") {
                    Some(Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
                    _ => None,
                })
                .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
            return Err(ExecutorError::Api {
                message,
                status: status.as_u16(),
            });
        }

        if body.is_empty() {
            return Ok(ApiObject::new());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
