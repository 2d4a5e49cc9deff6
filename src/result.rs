use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::error::{Error, Result};
use crate::runtime::InvokeModelResponse;

/// Unopinionated wrapper around the runtime's native `InvokeModel` response.
#[derive(Debug, Clone)]
pub struct RawBedrockResult {
    response: InvokeModelResponse,
}

impl RawBedrockResult {
    pub fn new(response: InvokeModelResponse) -> Self {
        Self { response }
    }

    /// The underlying runtime response.
    pub fn object(&self) -> &InvokeModelResponse {
        &self.response
    }

    pub fn into_object(self) -> InvokeModelResponse {
        self.response
    }

    /// Response body decoded as JSON.
    pub fn data(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.response.body)?)
    }
}

/// Tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// Interpreted model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelResult {
    Text { text: String },
    ToolCalls { tool_calls: Vec<ToolUse> },
}

/// Token usage reported by Nova (`usage` block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Result plus the metadata Nova reports next to it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedResult {
    pub result: ModelResult,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Converts raw Nova responses into [`ConvertedResult`]s.
///
/// Expected shape:
/// `{ "output": { "message": { "content": [ { "text": ... } | { "toolUse": {...} } ] } }, "stopReason": ..., "usage": {...} }`
#[derive(Debug, Clone, Copy, Default)]
pub struct NovaResultConverter;

impl NovaResultConverter {
    pub fn convert(&self, raw: &RawBedrockResult) -> Result<ConvertedResult> {
        self.convert_value(&raw.data()?)
    }

    pub fn convert_value(&self, data: &Value) -> Result<ConvertedResult> {
        let output = data.get("output").ok_or(Error::EmptyResponse)?;
        let content = output
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_array())
            .filter(|c| !c.is_empty())
            .ok_or(Error::MissingContent)?;

        let tool_calls: Vec<ToolUse> = content
            .iter()
            .filter_map(|item| item.get("toolUse"))
            .map(|tu| ToolUse {
                id: str_field(tu, "toolUseId"),
                name: str_field(tu, "name"),
                input: tu.get("input").cloned().unwrap_or(Value::Null),
            })
            .collect();

        let result = if tool_calls.is_empty() {
            let text = content[0]
                .get("text")
                .and_then(|t| t.as_str())
                .ok_or(Error::MissingContent)?;
            ModelResult::Text {
                text: text.to_string(),
            }
        } else {
            ModelResult::ToolCalls { tool_calls }
        };

        let stop_reason = data
            .get("stopReason")
            .and_then(|s| s.as_str())
            .map(str::to_string);
        let usage = data
            .get("usage")
            .and_then(|u| serde_json::from_value(u.clone()).ok());

        Ok(ConvertedResult {
            result,
            stop_reason,
            usage,
        })
    }
}

fn str_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(|s| s.as_str())
        .unwrap_or_default()
        .to_string()
}
