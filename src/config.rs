use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Region used when neither the config nor the environment names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Bedrock runtime configuration.
///
/// Environment:
/// - AWS_REGION / AWS_DEFAULT_REGION         -> region (default us-east-1)
/// - BEDROCK_ENDPOINT                        -> endpoint override (e.g. a local stub)
/// - AWS_BEARER_TOKEN_BEDROCK                -> Bedrock API key sent as Bearer token
/// - BEDROCK_HTTP_TIMEOUT_SECONDS            -> overall request timeout (u64)
/// - BEDROCK_PROXY_URL                       -> proxy for all schemes
/// - BEDROCK_NO_PROXY = 1|true|yes|on        -> disable all proxies
#[derive(Clone, Deserialize, Serialize)]
pub struct BedrockConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub no_proxy: bool,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            bearer_token: None,
            timeout_secs: None,
            proxy_url: None,
            no_proxy: false,
        }
    }
}

impl std::fmt::Debug for BedrockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .field("no_proxy", &self.no_proxy)
            .finish()
    }
}

impl BedrockConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let region = get("AWS_REGION")
            .or_else(|| get("AWS_DEFAULT_REGION"))
            .unwrap_or_else(default_region);
        let timeout_secs = get("BEDROCK_HTTP_TIMEOUT_SECONDS").and_then(|s| s.parse::<u64>().ok());
        let no_proxy = get("BEDROCK_NO_PROXY")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            region,
            endpoint: get("BEDROCK_ENDPOINT"),
            bearer_token: get("AWS_BEARER_TOKEN_BEDROCK"),
            timeout_secs,
            proxy_url: get("BEDROCK_PROXY_URL"),
            no_proxy,
        }
    }

    /// Load configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read Bedrock config file: {}",
                path.as_ref().display()
            )
        })?;

        let config: BedrockConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse Bedrock config JSON")?;

        Ok(config)
    }

    /// Endpoint override, or the public regional Bedrock runtime endpoint.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", self.region))
    }
}

pub(crate) fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
