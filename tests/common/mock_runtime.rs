#![allow(dead_code)]

use async_trait::async_trait;
use bedrock_nova::runtime::{BedrockRuntime, InvokeModelRequest, InvokeModelResponse, RuntimeError};
use std::sync::{Arc, Mutex};

enum Reply {
    Ok(InvokeModelResponse),
    Fail { status: u16, message: String },
}

/// In-memory `BedrockRuntime` that records every request it receives.
pub struct RecordingRuntime {
    region: String,
    reply: Reply,
    requests: Mutex<Vec<InvokeModelRequest>>,
}

impl RecordingRuntime {
    /// Runtime in `us-east-1` answering with a short Nova text response.
    pub fn new() -> Arc<Self> {
        Self::responding(
            "us-east-1",
            serde_json::json!({
                "output": {"message": {"role": "assistant", "content": [{"text": "ok"}]}},
                "stopReason": "end_turn"
            }),
        )
    }

    pub fn responding(region: &str, body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            region: region.to_string(),
            reply: Reply::Ok(InvokeModelResponse::ok(body.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            region: "us-east-1".to_string(),
            reply: Reply::Fail {
                status,
                message: message.to_string(),
            },
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("lock requests").len()
    }

    pub fn requests(&self) -> Vec<InvokeModelRequest> {
        self.requests.lock().expect("lock requests").clone()
    }

    /// Decoded JSON body of the most recent request.
    pub fn last_body(&self) -> serde_json::Value {
        let requests = self.requests();
        let last = requests.last().expect("at least one request");
        serde_json::from_str(&last.body).expect("request body is valid JSON")
    }
}

#[async_trait]
impl BedrockRuntime for RecordingRuntime {
    fn region(&self) -> &str {
        &self.region
    }

    async fn invoke_model(
        &self,
        request: InvokeModelRequest,
    ) -> Result<InvokeModelResponse, RuntimeError> {
        self.requests.lock().expect("lock requests").push(request);
        match &self.reply {
            Reply::Ok(resp) => Ok(resp.clone()),
            Reply::Fail { status, message } => Err(RuntimeError::Service {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
