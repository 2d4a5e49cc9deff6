use serde::{Deserialize, Serialize};
use std::fmt;

use super::options::RequestOptions;

/// Features a model advertises to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    InputMessages,
    InputImage,
    OutputText,
    ToolCalling,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::InputMessages => "input_messages",
            Capability::InputImage => "input_image",
            Capability::OutputText => "output_text",
            Capability::ToolCalling => "tool_calling",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amazon Nova model descriptor.
///
/// The name is the short form (`nova-pro`); the Bedrock model id is derived
/// from it by the model client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nova {
    name: String,
    capabilities: Vec<Capability>,
    /// Default options, applied underneath per-request options.
    #[serde(default)]
    options: RequestOptions,
}

impl Nova {
    pub const MICRO: &'static str = "nova-micro";
    pub const LITE: &'static str = "nova-lite";
    pub const PRO: &'static str = "nova-pro";
    pub const PREMIER: &'static str = "nova-premier";

    /// Short names of every Nova model known to this crate.
    pub const CATALOG: [&'static str; 4] = [Self::MICRO, Self::LITE, Self::PRO, Self::PREMIER];

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, RequestOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: RequestOptions) -> Self {
        let name = name.into();
        let mut capabilities = vec![
            Capability::InputMessages,
            Capability::OutputText,
            Capability::ToolCalling,
        ];
        // Micro is text-only.
        if name != Self::MICRO {
            capabilities.push(Capability::InputImage);
        }
        Self {
            name,
            capabilities,
            options,
        }
    }

    /// Look up a model from the catalog by short name.
    pub fn known(name: &str) -> Option<Self> {
        Self::CATALOG
            .iter()
            .find(|candidate| **candidate == name)
            .map(|candidate| Self::new(*candidate))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
