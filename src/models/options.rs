use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use serde_with::skip_serializing_none;

use crate::error::{Error, Result};

/// Options accepted alongside a Nova request.
///
/// Only `temperature`, `max_tokens` and `tools` reach the vendor body. Any other
/// key is collected in `extra` so callers can round-trip it, but the request
/// builder never emits it.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Kept as the caller's JSON number, so `1` stays an integer on the wire.
    #[serde(default)]
    pub temperature: Option<Number>,
    /// Emitted as `inferenceConfig.maxTokens`.
    #[serde(default)]
    pub max_tokens: Option<u64>,
    /// Already-normalized tool specs, emitted as `toolConfig.tools` in order.
    #[serde(default)]
    pub tools: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    /// Set `temperature` from a float; NaN and infinities have no JSON form.
    pub fn with_temperature(mut self, temperature: f64) -> Result<Self> {
        let number = Number::from_f64(temperature).ok_or_else(|| Error::InvalidOption {
            option: "temperature",
            reason: format!("{temperature} is not a finite number"),
        })?;
        self.temperature = Some(number);
        Ok(self)
    }

    /// Layer `self` over `defaults`; values set on `self` win.
    pub fn merged_over(&self, defaults: &RequestOptions) -> RequestOptions {
        let mut extra = defaults.extra.clone();
        for (k, v) in &self.extra {
            extra.insert(k.clone(), v.clone());
        }
        RequestOptions {
            temperature: self
                .temperature
                .clone()
                .or_else(|| defaults.temperature.clone()),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            tools: self.tools.clone().or_else(|| defaults.tools.clone()),
            extra,
        }
    }

    /// True when at least one sampling option is set.
    pub fn has_inference_config(&self) -> bool {
        self.temperature.is_some() || self.max_tokens.is_some()
    }
}
