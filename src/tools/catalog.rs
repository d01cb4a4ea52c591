//! Static tool catalog returned by `tools/list`

use serde_json::{json, Value};

use crate::mcp::protocol::ToolDefinition;
use crate::tools::ToolName;

/// Definitions for every registered tool, in catalog order
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(definition).collect()
}

/// Definition for a single tool
pub fn definition(tool: ToolName) -> ToolDefinition {
    ToolDefinition {
        name: tool.as_str().to_string(),
        description: description(tool).to_string(),
        input_schema: input_schema(tool),
    }
}

fn description(tool: ToolName) -> &'static str {
    match tool {
        ToolName::AkumaQuery => "Translate natural language into SQL (optionally returning rows or explanation).",
        ToolName::AkumaExplain => "Explain a SQL query in plain English.",
        ToolName::AkumaSchema => "Set Akuma schema context used for query generation.",
        ToolName::EnzanSummary => "Summarize GPU spend and usage for a time window.",
        ToolName::EnzanBurn => "Get current burn rate in USD/hour.",
        ToolName::SozoGenerate => "Generate synthetic tabular data from a schema or named preset.",
        ToolName::SozoSchemas => "List built-in Sozo schema presets.",
    }
}

fn input_schema(tool: ToolName) -> Value {
    match tool {
        ToolName::AkumaQuery => json!({
            "type": "object",
            "properties": {
                "dialect": {"type": "string", "enum": ["postgres", "mysql", "snowflake", "bigquery"]},
                "prompt": {"type": "string"},
                "mode": {"type": "string", "enum": ["sql-only", "sql-and-results", "explain"]},
                "maxRows": {"type": "number"},
                "guardrails": {"type": "object"}
            },
            "required": ["dialect", "prompt"],
            "additionalProperties": false
        }),
        ToolName::AkumaExplain => json!({
            "type": "object",
            "properties": {
                "sql": {"type": "string"}
            },
            "required": ["sql"],
            "additionalProperties": false
        }),
        ToolName::AkumaSchema => json!({
            "type": "object",
            "properties": {
                "version": {"type": "string"},
                "tables": {"type": "array", "items": {"type": "object"}}
            },
            "required": ["tables"],
            "additionalProperties": false
        }),
        ToolName::EnzanSummary => json!({
            "type": "object",
            "properties": {
                "window": {"type": "string", "enum": ["1h", "24h", "7d", "30d"]},
                "groupBy": {"type": "array", "items": {"type": "string"}}
            },
            "additionalProperties": false
        }),
        ToolName::SozoGenerate => json!({
            "type": "object",
            "properties": {
                "records": {"type": "number"},
                "schemaName": {"type": "string"},
                "schema": {"type": "object"},
                "correlations": {"type": "object"},
                "seed": {"type": "number"}
            },
            "required": ["records"],
            "additionalProperties": false
        }),
        ToolName::EnzanBurn | ToolName::SozoSchemas => json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        }),
    }
}
