#![forbid(unsafe_code)]
#![doc = r#"
Bedrock Nova

Shape chat requests into Amazon Nova payloads and invoke them through the AWS Bedrock `InvokeModel` API.

Crate highlights
- Library: request shaping via `NovaModelClient::build_body(payload, &RequestOptions)`,
  single-call dispatch via `NovaModelClient::request`.
- HTTP server (in `server`): `/convert` (build only) and `/invoke` (dispatch + interpret).
- Models: Nova catalog, a provider-neutral message bag and request options.

Modules
- `models`: Nova descriptor, messages, tools and options.
- `contract`: Mapping from the message bag into Nova's message payload.
- `client`: Request builder and dispatcher.
- `runtime`: `BedrockRuntime` seam and its HTTP implementation.
- `result`: Raw result wrapper and Nova result conversion.
- `platform`: Contract, client and converter wired together.
- `server`: Axum router/handlers (the binary uses this).
- `config` / `util`: Environment configuration, tracing and HTTP helpers.
"#]

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod models;
pub mod platform;
pub mod result;
pub mod runtime;
pub mod server;
pub mod util;

pub use crate::client::NovaModelClient;
pub use crate::error::{Error, Result};
pub use crate::platform::Platform;
pub use crate::result::{ConvertedResult, ModelResult, NovaResultConverter, RawBedrockResult};
pub use crate::runtime::{BedrockRuntime, HttpBedrockRuntime, InvokeModelRequest, InvokeModelResponse};

// Re-export model types for convenience (downstream users can do `use bedrock_nova::Nova`).
pub use crate::models::{Message, MessageBag, Nova, RequestOptions, Tool};
