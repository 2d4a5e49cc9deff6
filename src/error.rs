use thiserror::Error;

use crate::models::Capability;
use crate::runtime::RuntimeError;

/// Errors raised while shaping, dispatching or interpreting a Nova request.
///
/// Dispatch failures are not reinterpreted: whatever the runtime reports is
/// carried unchanged in [`Error::Runtime`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },
    #[error("Model `{model}` does not support {capability} content")]
    UnsupportedInput {
        model: String,
        capability: Capability,
    },
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("Response does not contain any content.")]
    EmptyResponse,
    #[error("Response content does not contain any text.")]
    MissingContent,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
