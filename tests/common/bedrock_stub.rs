#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Minimal stand-in for the Bedrock runtime `InvokeModel` endpoint.
#[derive(Clone)]
pub struct BedrockStub {
    base_url: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedInvoke>>>,
    shutdown: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

/// What the stub saw for one call.
#[derive(Clone, Debug)]
pub struct RecordedInvoke {
    pub model_id: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl StubReply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "message": message }),
        }
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedInvoke>>>,
}

impl BedrockStub {
    pub async fn start(reply: StubReply) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            reply,
            calls: calls.clone(),
            requests: requests.clone(),
        });

        let router = Router::new()
            .route("/model/:model_id/invoke", post(invoke_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind bedrock stub");
        let addr = listener.local_addr().expect("bedrock stub local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let server = axum::serve(listener, router.into_make_service());
        tokio::spawn(async move {
            tokio::select! {
                res = server => {
                    if let Err(err) = res {
                        eprintln!("Bedrock stub server error: {err:?}");
                    }
                }
                _ = rx => {}
            }
        });

        BedrockStub {
            base_url: format!("http://{}", addr),
            calls,
            requests,
            shutdown: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn take_requests(&self) -> Vec<RecordedInvoke> {
        let mut guard = self.requests.lock().expect("lock stub requests");
        guard.drain(..).collect()
    }
}

impl Drop for BedrockStub {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.shutdown.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(());
            }
        }
    }
}

fn header(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn invoke_handler(
    State(state): State<Arc<StubState>>,
    Path(model_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(&'static str, &'static str); 1], Json<serde_json::Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut guard) = state.requests.lock() {
        guard.push(RecordedInvoke {
            model_id,
            content_type: header(&headers, http::header::CONTENT_TYPE),
            accept: header(&headers, http::header::ACCEPT),
            authorization: header(&headers, http::header::AUTHORIZATION),
            body,
        });
    }

    (
        state.reply.status,
        [("x-amzn-requestid", "stub-request-1")],
        Json(state.reply.body.clone()),
    )
}

/// A typical Nova text completion body.
pub fn nova_text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "output": {
            "message": {
                "role": "assistant",
                "content": [{ "text": text }]
            }
        },
        "stopReason": "end_turn",
        "usage": { "inputTokens": 12, "outputTokens": 4, "totalTokens": 16 }
    })
}
