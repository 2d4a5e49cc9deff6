//! Bedrock runtime seam.
//!
//! `BedrockRuntime` is the only collaborator the model client talks to. The
//! crate ships `HttpBedrockRuntime`, which posts to the Bedrock `InvokeModel`
//! endpoint with a Bedrock API key; tests substitute recording mocks.

use async_trait::async_trait;
use bytes::Bytes;
use http::header;
use thiserror::Error;
use url::Url;

use crate::config::BedrockConfig;
use crate::util::build_http_client;

/// Content type of every Nova request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Input of a single `InvokeModel` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeModelRequest {
    pub model_id: String,
    pub content_type: String,
    pub accept: String,
    /// Serialized JSON body.
    pub body: String,
}

impl InvokeModelRequest {
    pub fn json(model_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            accept: CONTENT_TYPE_JSON.to_string(),
            body: body.into(),
        }
    }
}

/// Native `InvokeModel` output, kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeModelResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Value of the `x-amzn-requestid` header when the service sent one.
    pub request_id: Option<String>,
    pub body: Bytes,
}

impl InvokeModelResponse {
    /// A 200 JSON response carrying `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            content_type: Some(CONTENT_TYPE_JSON.to_string()),
            request_id: None,
            body: body.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Bedrock returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("Invalid Bedrock endpoint `{0}`")]
    InvalidEndpoint(String),
}

/// Client capable of invoking a Bedrock model.
#[async_trait]
pub trait BedrockRuntime: Send + Sync {
    /// AWS region the client targets, e.g. `us-east-1`.
    fn region(&self) -> &str;

    async fn invoke_model(
        &self,
        request: InvokeModelRequest,
    ) -> Result<InvokeModelResponse, RuntimeError>;
}

/// `BedrockRuntime` over plain HTTPS with bearer (Bedrock API key) auth.
pub struct HttpBedrockRuntime {
    http: reqwest::Client,
    endpoint: String,
    region: String,
    bearer_token: Option<String>,
}

impl HttpBedrockRuntime {
    pub fn new(config: &BedrockConfig) -> Self {
        Self::with_client(build_http_client(config), config)
    }

    /// Use a caller-provided HTTP client (proxy/timeout settings in `config` are ignored).
    pub fn with_client(http: reqwest::Client, config: &BedrockConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint(),
            region: config.region.clone(),
            bearer_token: config.bearer_token.clone().filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}/model/{model_id}/invoke`, with the model id encoded as one path segment.
    fn invoke_url(&self, model_id: &str) -> Result<Url, RuntimeError> {
        let invalid = || RuntimeError::InvalidEndpoint(self.endpoint.clone());
        let mut url = Url::parse(&self.endpoint).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);
        Ok(url)
    }
}

#[async_trait]
impl BedrockRuntime for HttpBedrockRuntime {
    fn region(&self) -> &str {
        &self.region
    }

    async fn invoke_model(
        &self,
        request: InvokeModelRequest,
    ) -> Result<InvokeModelResponse, RuntimeError> {
        let url = self.invoke_url(&request.model_id)?;
        tracing::debug!(
            url = %url,
            has_bearer = self.bearer_token.is_some(),
            body_len = request.body.len(),
            "invoke_model: sending request"
        );

        let mut rb = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, request.content_type)
            .header(header::ACCEPT, request.accept)
            .body(request.body);
        if let Some(token) = &self.bearer_token {
            rb = rb.bearer_auth(token);
        }
        let resp = rb.send().await?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let request_id = resp
            .headers()
            .get("x-amzn-requestid")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = service_error_message(&body);
            tracing::warn!(status = status.as_u16(), request_id = ?request_id, error = %message, "invoke_model: upstream error");
            return Err(RuntimeError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(InvokeModelResponse {
            status: status.as_u16(),
            content_type,
            request_id,
            body,
        })
    }
}

/// Bedrock error bodies look like `{"message": "..."}`; fall back to the raw text.
fn service_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}
