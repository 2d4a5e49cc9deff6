use anyhow::Context;
use bedrock_nova::config::BedrockConfig;
use bedrock_nova::server::{build_router, AppState};
use bedrock_nova::util::{env_bind_addr, init_tracing};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    // Check for --config flag (JSON file); falls back to environment variables
    let config_arg = args
        .iter()
        .find(|a| a.starts_with("--config="))
        .and_then(|a| a.strip_prefix("--config="))
        .map(|s| s.to_string());

    let config = match config_arg {
        Some(path) => {
            tracing::info!("Loading Bedrock configuration from: {}", path);
            BedrockConfig::load_from_file(&path)?
        }
        None => {
            tracing::info!("No config file provided, reading Bedrock settings from environment");
            BedrockConfig::from_env()
        }
    };

    if config.bearer_token.is_none() {
        tracing::warn!("AWS_BEARER_TOKEN_BEDROCK is not set; requests will be sent unauthenticated");
    }
    tracing::info!(region = %config.region, endpoint = %config.endpoint(), "Bedrock runtime configured");

    let app = build_router(Arc::new(AppState::from_config(&config)));

    let addr = env_bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("bedrock-nova listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
