//! Enzan tools: GPU spend and burn rate

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiObject, Method, RemoteExecutor};
use crate::tools::{encode_payload, ToolError};

/// Window summarized when the caller does not pick one
pub const DEFAULT_WINDOW: &str = "24h";

/// Arguments for `enzan.summary`
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryArgs {
    pub window: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Value>,
}

/// Summarize spend and usage for a time window
pub async fn summary(executor: &dyn RemoteExecutor, mut args: SummaryArgs) -> Result<ApiObject, ToolError> {
    if args.window.is_none() {
        args.window = Some(Value::String(DEFAULT_WINDOW.to_string()));
    }

    let payload = encode_payload(&args)?;
    Ok(executor
        .execute(Method::POST, "/v1/enzan/summary", Some(payload))
        .await?)
}

/// Current burn rate in USD/hour
pub async fn burn(executor: &dyn RemoteExecutor) -> Result<ApiObject, ToolError> {
    Ok(executor.execute(Method::GET, "/v1/enzan/burn", None).await?)
}
