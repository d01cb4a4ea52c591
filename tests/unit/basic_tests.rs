/// Basic unit tests to verify core functionality
use kaizen_mcp::mcp::framing::parse_content_length;
use kaizen_mcp::mcp::protocol::{ErrorCode, ToolCallResult};
use kaizen_mcp::*;
use serde_json::json;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_server_creation_without_api_key() {
        let server = KaizenServer::new(Config::default());
        assert!(server.is_ok());
        let server = server.unwrap();
        assert_eq!(server.config().api_base_url, "http://localhost:8080");
        assert!(server.config().api_key.is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_every_call() {
        let client = KaizenApiClient::new(&Config::new("http://127.0.0.1:9", None)).unwrap();
        let err = client
            .execute(Method::GET, "/v1/enzan/burn", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutorError::MissingApiKey));
    }

    #[test]
    fn test_client_keeps_normalized_base_url() {
        let client = KaizenApiClient::new(&Config::new("https://kaizen.example/", Some("k".into()))).unwrap();
        assert_eq!(client.base_url(), "https://kaizen.example");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(ErrorCode::InvalidParams.code(), -32602);
    }

    #[test]
    fn test_content_length_header_casing() {
        assert_eq!(parse_content_length(&["CoNtEnT-LeNgTh: 42"]).unwrap(), 42);
        assert!(parse_content_length(&["Content-Length: nope"]).is_err());
    }

    #[test]
    fn test_tool_names_are_closed_set() {
        let names: Vec<&str> = ToolName::ALL.iter().map(|t| t.as_str()).collect();
        assert!(names.contains(&"akuma.schema"));
        assert!("akuma.delete".parse::<ToolName>().is_err());
    }

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(ToolError::MissingArgument("sql").to_string(), "sql is required");
        assert_eq!(ToolError::MissingSchema.to_string(), "schema or schemaName is required");
        let timeout = ToolError::from(ExecutorError::Timeout(std::time::Duration::from_secs(60)));
        assert_eq!(timeout.to_string(), "request timed out after 60s");
    }

    #[test]
    fn test_sub_second_timeout_message() {
        let timeout = ExecutorError::Timeout(std::time::Duration::from_millis(250));
        assert_eq!(timeout.to_string(), "request timed out after 250ms");
    }

    #[test]
    fn test_failed_tool_result_shape() {
        let value = serde_json::to_value(ToolCallResult::error("sql is required".into())).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "sql is required"}], "isError": true})
        );
    }
}
