//! Shared fixtures for the integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kaizen_mcp::*;
use serde_json::Value;
use tokio::io::BufReader;

pub type Call = (Method, String, Option<Value>);

/// Executor that records calls and replies with a fixed outcome
#[derive(Clone)]
pub struct FakeExecutor {
    calls: Arc<Mutex<Vec<Call>>>,
    reply: Result<ApiObject, (String, u16)>,
}

impl FakeExecutor {
    pub fn replying(reply: Value) -> Self {
        let reply = match reply {
            Value::Object(map) => map,
            other => panic!("fake replies must be objects, got {}", other),
        };
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Ok(reply),
        }
    }

    pub fn failing(message: &str, status: u16) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Err((message.to_string(), status)),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteExecutor for FakeExecutor {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<ApiObject, ExecutorError> {
        self.calls
            .lock()
            .unwrap()
            .push((method, path.to_string(), payload));
        match &self.reply {
            Ok(data) => Ok(data.clone()),
            Err((message, status)) => Err(ExecutorError::Api {
                message: message.clone(),
                status: *status,
            }),
        }
    }
}

/// Content-Length frame around `body`
pub fn framed(body: &str) -> String {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body)
}

/// Run the serve loop over `input`; returns the loop result and every
/// response frame written
pub async fn serve(
    input: &[u8],
    executor: FakeExecutor,
) -> (Result<(), ServerError>, Vec<JsonRpcResponse>, Vec<u8>) {
    let server = McpServer::new(KaizenServer::with_executor(Config::default(), executor));
    let mut output = Vec::new();
    let result = server.serve(BufReader::new(input), &mut output).await;

    let mut frames = FrameReader::new(BufReader::new(output.as_slice()));
    let mut responses = Vec::new();
    while let Some(frame) = frames.next_frame().await.expect("server output is well framed") {
        responses.push(serde_json::from_slice(&frame).expect("server output is a response"));
    }

    (result, responses, output)
}
