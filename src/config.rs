//! Runtime configuration
//!
//! Values come from the command line or the environment (see `main.rs`);
//! this type only normalizes them.

use std::time::Duration;

/// Base URL used when `KAIZEN_API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Wall-clock deadline applied to each tool invocation
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration shared by the dispatcher and the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Kaizen API base URL, without trailing slashes
    pub api_base_url: String,
    /// Bearer credential; `None` makes every tool call fail
    pub api_key: Option<String>,
    /// Deadline for one tool invocation
    pub tool_timeout: Duration,
}

impl Config {
    /// Build a configuration, trimming the URL and ignoring a blank key
    pub fn new(api_base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let raw: String = api_base_url.into();
        let trimmed = raw.trim();
        let api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.trim_end_matches('/').to_string()
        };

        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self {
            api_base_url,
            api_key,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Override the per-call deadline
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, None)
    }
}
