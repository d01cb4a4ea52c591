//! Akuma tools: natural language to SQL
//!
//! This module implements `akuma.query`, `akuma.explain` and `akuma.schema`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiObject, Method, RemoteExecutor};
use crate::tools::{encode_payload, require_text, ToolError};

/// Arguments for `akuma.query`, forwarded as the request body
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryArgs {
    pub dialect: Option<String>,
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrails: Option<Value>,
}

/// Arguments for `akuma.explain`
#[derive(Debug, Deserialize, Serialize)]
pub struct ExplainArgs {
    pub sql: Option<String>,
}

/// Arguments for `akuma.schema`
#[derive(Debug, Deserialize, Serialize)]
pub struct SchemaArgs {
    pub tables: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

/// Translate a prompt into SQL for the given dialect
pub async fn query(executor: &dyn RemoteExecutor, args: QueryArgs) -> Result<ApiObject, ToolError> {
    require_text("dialect", args.dialect.as_deref())?;
    require_text("prompt", args.prompt.as_deref())?;

    let payload = encode_payload(&args)?;
    Ok(executor
        .execute(Method::POST, "/v1/akuma/query", Some(payload))
        .await?)
}

/// Explain a SQL statement in plain English
pub async fn explain(executor: &dyn RemoteExecutor, args: ExplainArgs) -> Result<ApiObject, ToolError> {
    require_text("sql", args.sql.as_deref())?;

    let payload = encode_payload(&args)?;
    Ok(executor
        .execute(Method::POST, "/v1/akuma/explain", Some(payload))
        .await?)
}

/// Set the schema context used for query generation
pub async fn schema(executor: &dyn RemoteExecutor, args: SchemaArgs) -> Result<ApiObject, ToolError> {
    if args.tables.is_none() {
        return Err(ToolError::MissingArgument("tables"));
    }

    let payload = encode_payload(&args)?;
    Ok(executor
        .execute(Method::POST, "/v1/akuma/schema", Some(payload))
        .await?)
}
