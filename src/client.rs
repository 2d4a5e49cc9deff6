use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Nova, RequestOptions};
use crate::result::RawBedrockResult;
use crate::runtime::{BedrockRuntime, InvokeModelRequest};

/// Model client for Amazon Nova on Bedrock.
///
/// Shapes the request body and performs exactly one `InvokeModel` call per
/// [`NovaModelClient::request`]. Failures from the runtime are returned as-is.
#[derive(Clone)]
pub struct NovaModelClient {
    runtime: Arc<dyn BedrockRuntime>,
}

impl NovaModelClient {
    pub fn new(runtime: Arc<dyn BedrockRuntime>) -> Self {
        Self { runtime }
    }

    /// Bedrock model id for `model`, e.g. `us.amazon.nova-pro-v1:0`.
    ///
    /// The prefix is the first two characters of the runtime region, which
    /// selects the cross-region inference profile (`us`, `eu`, `ap`).
    pub fn model_id(&self, model: &Nova) -> String {
        let region = self.runtime.region();
        let prefix = region.get(..2).unwrap_or(region);
        format!("{prefix}.amazon.{}-v1:0", model.name())
    }

    /// Build the Nova body from a message payload and options.
    ///
    /// - `model` is removed from the payload.
    /// - `temperature` / `max_tokens` go under `inferenceConfig` (`maxTokens`), only when set.
    /// - a non-empty `tools` list goes under `toolConfig.tools`, order preserved.
    /// - option-derived keys replace same-named payload keys.
    pub fn build_body(
        mut payload: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Map<String, Value>> {
        payload.remove("model");

        if options.has_inference_config() {
            let mut inference = Map::new();
            if let Some(t) = &options.temperature {
                inference.insert("temperature".into(), Value::Number(t.clone()));
            }
            if let Some(n) = options.max_tokens {
                inference.insert("maxTokens".into(), Value::Number(n.into()));
            }
            payload.insert("inferenceConfig".into(), Value::Object(inference));
        }

        if let Some(tools) = options.tools.as_ref().filter(|t| !t.is_empty()) {
            let mut tool_config = Map::new();
            tool_config.insert("tools".into(), Value::Array(tools.clone()));
            payload.insert("toolConfig".into(), Value::Object(tool_config));
        }

        Ok(payload)
    }

    /// Build the complete `InvokeModel` input without sending it.
    pub fn build_request(
        &self,
        model: &Nova,
        payload: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<InvokeModelRequest> {
        let body = Self::build_body(payload, options)?;
        let body = serde_json::to_string(&body)?;
        Ok(InvokeModelRequest::json(self.model_id(model), body))
    }

    /// Shape the request and dispatch it once through the runtime.
    pub async fn request(
        &self,
        model: &Nova,
        payload: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<RawBedrockResult> {
        let request = self.build_request(model, payload, options)?;
        tracing::debug!(
            model_id = %request.model_id,
            body_len = request.body.len(),
            "nova request prepared"
        );
        let response = self.runtime.invoke_model(request).await?;
        Ok(RawBedrockResult::new(response))
    }
}
