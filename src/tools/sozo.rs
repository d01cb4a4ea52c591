//! Sozo tools: synthetic data generation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiObject, Method, RemoteExecutor};
use crate::tools::{encode_payload, ToolError};

/// Arguments for `sozo.generate`
///
/// Either an inline `schema` or a preset `schemaName` must be given.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArgs {
    pub records: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Value>,
}

/// Generate synthetic records
pub async fn generate(executor: &dyn RemoteExecutor, args: GenerateArgs) -> Result<ApiObject, ToolError> {
    if args.records.is_none() {
        return Err(ToolError::MissingArgument("records"));
    }
    if args.schema.is_none() && args.schema_name.is_none() {
        return Err(ToolError::MissingSchema);
    }

    let payload = encode_payload(&args)?;
    Ok(executor
        .execute(Method::POST, "/v1/sozo/generate", Some(payload))
        .await?)
}

/// List the built-in schema presets
pub async fn schemas(executor: &dyn RemoteExecutor) -> Result<ApiObject, ToolError> {
    Ok(executor.execute(Method::GET, "/v1/sozo/schemas", None).await?)
}
