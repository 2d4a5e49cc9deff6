use std::sync::Arc;

use crate::client::NovaModelClient;
use crate::contract;
use crate::error::{Error, Result};
use crate::models::{Capability, MessageBag, Nova, RequestOptions, Tool};
use crate::result::{ConvertedResult, NovaResultConverter, RawBedrockResult};
use crate::runtime::{BedrockRuntime, InvokeModelRequest};

/// Entry point wiring message normalization, the Nova client and result conversion.
#[derive(Clone)]
pub struct Platform {
    client: NovaModelClient,
    converter: NovaResultConverter,
}

impl Platform {
    pub fn new(runtime: Arc<dyn BedrockRuntime>) -> Self {
        Self {
            client: NovaModelClient::new(runtime),
            converter: NovaResultConverter,
        }
    }

    pub fn client(&self) -> &NovaModelClient {
        &self.client
    }

    /// Effective options: request options over the model defaults, with
    /// `tools` (when non-empty) replacing any pre-normalized tool list.
    fn effective_options(model: &Nova, tools: &[Tool], options: &RequestOptions) -> RequestOptions {
        let mut merged = options.merged_over(model.options());
        if !tools.is_empty() {
            merged.tools = Some(contract::map_tools(tools));
        }
        merged
    }

    /// Reject content the model cannot take before anything is built or sent.
    fn check_input(model: &Nova, messages: &MessageBag) -> Result<()> {
        if messages.has_images() && !model.supports(Capability::InputImage) {
            return Err(Error::UnsupportedInput {
                model: model.name().to_string(),
                capability: Capability::InputImage,
            });
        }
        Ok(())
    }

    /// Build the `InvokeModel` input for a conversation without dispatching it.
    pub fn prepare(
        &self,
        model: &Nova,
        messages: &MessageBag,
        tools: &[Tool],
        options: &RequestOptions,
    ) -> Result<InvokeModelRequest> {
        Self::check_input(model, messages)?;
        let options = Self::effective_options(model, tools, options);
        self.client
            .build_request(model, contract::to_nova_payload(messages), &options)
    }

    /// Dispatch a conversation and return the untouched runtime response.
    pub async fn invoke_raw(
        &self,
        model: &Nova,
        messages: &MessageBag,
        tools: &[Tool],
        options: &RequestOptions,
    ) -> Result<RawBedrockResult> {
        Self::check_input(model, messages)?;
        let options = Self::effective_options(model, tools, options);
        self.client
            .request(model, contract::to_nova_payload(messages), &options)
            .await
    }

    /// Dispatch a conversation and interpret the response.
    pub async fn invoke(
        &self,
        model: &Nova,
        messages: &MessageBag,
        tools: &[Tool],
        options: &RequestOptions,
    ) -> Result<ConvertedResult> {
        let raw = self.invoke_raw(model, messages, tools, options).await?;
        self.converter.convert(&raw)
    }
}
