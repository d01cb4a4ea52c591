use kaizen_mcp::*;
use serde_json::json;

use crate::support::{framed, serve, FakeExecutor};

#[tokio::test]
async fn test_missing_prompt_is_a_tool_failure() {
    let executor = FakeExecutor::replying(json!({"sql": "SELECT 1"}));
    let input = framed(
        r#"{"id":2,"method":"tools/call","params":{"name":"akuma.query","arguments":{"dialect":"postgres"}}}"#,
    );
    let (result, responses, _) = serve(input.as_bytes(), executor.clone()).await;

    assert!(result.is_ok());
    assert_eq!(responses.len(), 1);
    assert!(responses[0].error_info().is_none());

    let tool_result = responses[0].result().unwrap();
    assert_eq!(tool_result["isError"], json!(true));
    let text = tool_result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("prompt is required"));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_every_required_argument_failure_is_in_band() {
    let cases = [
        ("akuma.query", json!({})),
        ("akuma.explain", json!({"sql": ""})),
        ("akuma.schema", json!({})),
        ("sozo.generate", json!({"records": 10})),
    ];

    for (name, arguments) in cases {
        let executor = FakeExecutor::replying(json!({}));
        let body = json!({
            "jsonrpc": "2.0",
            "id": name,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        });
        let (_, responses, _) = serve(framed(&body.to_string()).as_bytes(), executor.clone()).await;

        let tool_result = responses[0].result().expect(name);
        assert_eq!(tool_result["isError"], json!(true), "{}", name);
        assert!(!tool_result["content"][0]["text"].as_str().unwrap().is_empty());
        assert!(executor.calls().is_empty(), "{}", name);
    }
}

#[tokio::test]
async fn test_unknown_tool_is_rpc_error() {
    let input = "{\"id\":9,\"method\":\"tools/call\",\"params\":{\"name\":\"nope.tool\",\"arguments\":{}}}\n";
    let (_, responses, _) = serve(input.as_bytes(), FakeExecutor::replying(json!({}))).await;

    let err = responses[0].error_info().unwrap();
    assert_eq!(err.code, -32602);
    assert_eq!(err.data, Some(json!("nope.tool")));
}

#[tokio::test]
async fn test_successful_call_renders_text_and_structure() {
    let executor = FakeExecutor::replying(json!({"sql": "SELECT count(*) FROM orders", "rows": []}));
    let input = framed(
        r#"{"id":"q","method":"tools/call","params":{"name":"akuma.query","arguments":{"dialect":"mysql","prompt":"count orders","mode":"sql-only"}}}"#,
    );
    let (_, responses, _) = serve(input.as_bytes(), executor.clone()).await;

    let tool_result = responses[0].result().unwrap();
    assert!(tool_result.get("isError").is_none());
    assert_eq!(
        tool_result["structuredContent"],
        json!({"sql": "SELECT count(*) FROM orders", "rows": []})
    );
    let text = tool_result["content"][0]["text"].as_str().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(reparsed, tool_result["structuredContent"]);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Method::POST);
    assert_eq!(calls[0].1, "/v1/akuma/query");
    assert_eq!(
        calls[0].2,
        Some(json!({"dialect": "mysql", "prompt": "count orders", "mode": "sql-only"}))
    );
}

#[tokio::test]
async fn test_backend_failure_is_a_tool_failure() {
    let executor = FakeExecutor::failing("quota exceeded", 429);
    let input = "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"enzan.burn\"}}\n";
    let (result, responses, _) = serve(input.as_bytes(), executor.clone()).await;

    assert!(result.is_ok());
    let tool_result = responses[0].result().unwrap();
    assert_eq!(tool_result["isError"], json!(true));
    assert_eq!(
        tool_result["content"][0]["text"],
        json!("quota exceeded (status=429)")
    );
    assert_eq!(executor.calls().len(), 1);
}

#[tokio::test]
async fn test_tool_call_notification_still_runs_silently() {
    let executor = FakeExecutor::replying(json!({}));
    let input = "{\"method\":\"tools/call\",\"params\":{\"name\":\"sozo.schemas\"}}\n";
    let (_, responses, raw) = serve(input.as_bytes(), executor.clone()).await;

    assert!(responses.is_empty());
    assert!(raw.is_empty());
    assert_eq!(executor.calls().len(), 1);
}
