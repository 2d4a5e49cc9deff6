use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::BedrockConfig;
use crate::error::Error;
use crate::models::{MessageBag, Nova, RequestOptions, Tool};
use crate::platform::Platform;
use crate::runtime::{BedrockRuntime, HttpBedrockRuntime};
use crate::util::{cors_layer_from_env, error_response};

/// Shared application state used by the HTTP handlers.
pub struct AppState {
    pub platform: Platform,
}

impl AppState {
    pub fn new(runtime: Arc<dyn BedrockRuntime>) -> Self {
        Self {
            platform: Platform::new(runtime),
        }
    }

    /// State backed by the HTTP Bedrock runtime configured from `config`.
    pub fn from_config(config: &BedrockConfig) -> Self {
        Self::new(Arc::new(HttpBedrockRuntime::new(config)))
    }
}

/// Chat-style request accepted by `/convert` and `/invoke`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Short Nova model name, e.g. `nova-pro`.
    pub model: String,
    pub messages: MessageBag,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub options: RequestOptions,
}

/// Build the Axum router with `/status`, `/convert` and `/invoke`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/convert", post(convert))
        .route("/invoke", post(invoke))
        .with_state(state)
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
}

/// Service status endpoint listing the known models and routes.
async fn status() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "bedrock-nova",
        "version": env!("CARGO_PKG_VERSION"),
        "models": Nova::CATALOG,
        "routes": ["/status", "/convert", "/invoke"]
    }))
}

fn resolve_model(name: &str) -> Result<Nova, Response> {
    Nova::known(name).ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            &format!("unknown Nova model: {name}"),
        )
    })
}

fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::InvalidOption { .. } | Error::UnsupportedInput { .. } => StatusCode::BAD_REQUEST,
        Error::Serialization(_)
        | Error::Runtime(_)
        | Error::EmptyResponse
        | Error::MissingContent => StatusCode::BAD_GATEWAY,
    }
}

/// Build the Bedrock `InvokeModel` input for a chat request without sending it.
async fn convert(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Response {
    let model = match resolve_model(&req.model) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let prepared = match state
        .platform
        .prepare(&model, &req.messages, &req.tools, &req.options)
    {
        Ok(p) => p,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let body: serde_json::Value = match serde_json::from_str(&prepared.body) {
        Ok(v) => v,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("serialize error: {e}"),
            )
        }
    };

    Json(serde_json::json!({
        "modelId": prepared.model_id,
        "contentType": prepared.content_type,
        "body": body,
    }))
    .into_response()
}

/// Invoke Nova on Bedrock and return the interpreted result.
async fn invoke(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Response {
    let model = match resolve_model(&req.model) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    match state
        .platform
        .invoke(&model, &req.messages, &req.tools, &req.options)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::warn!(model = %req.model, error = %e, "invoke failed");
            error_response(error_status(&e), &e.to_string())
        }
    }
}
