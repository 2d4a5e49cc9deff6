use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::BedrockConfig;

/// Initialize dotenv and structured tracing based on RUST_LOG.
/// - Supports explicit env file paths via ENV_FILE, ENVFILE, DOTENV_PATH
/// - Falls back to .envfile, then default .env discovery
/// - Logs the source used
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    for key in ["ENV_FILE", "ENVFILE", "DOTENV_PATH"] {
        if let Ok(p) = std::env::var(key) {
            let p = p.trim();
            if !p.is_empty()
                && std::path::Path::new(p).is_file()
                && dotenvy::from_filename(p).is_ok()
            {
                env_source = format!("{p} ({key})");
                break;
            }
        }
    }

    if env_source == "none"
        && std::path::Path::new(".envfile").is_file()
        && dotenvy::from_filename(".envfile").is_ok()
    {
        env_source = ".envfile".into();
    }

    if env_source == "none" {
        if let Ok(path) = dotenvy::dotenv() {
            env_source = path.display().to_string();
        }
    }

    // RUST_LOG may come from the env file loaded above.
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Get the bind address for the HTTP server from env or default to 0.0.0.0:8088.
pub fn env_bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8088".into())
}

/// Build the HTTP client used by the Bedrock runtime, honoring proxy and timeout settings.
pub fn build_http_client(config: &BedrockConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }

    if config.no_proxy {
        builder = builder.no_proxy();
    } else if let Some(url) = config.proxy_url.as_deref() {
        match reqwest::Proxy::all(url) {
            Ok(p) => builder = builder.proxy(p),
            Err(e) => tracing::warn!(error = %e, proxy = %url, "ignoring invalid proxy url"),
        }
    }

    builder = builder.user_agent(format!("bedrock-nova/{}", env!("CARGO_PKG_VERSION")));

    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default http client");
        reqwest::Client::new()
    })
}

/// Build a JSON error response with the given HTTP status and message.
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    let body = serde_json::json!({ "error": { "message": msg } });
    (status, axum::Json(body)).into_response()
}

/// Build a CORS layer from environment variables.
///
/// - CORS_ALLOWED_ORIGINS: "*" or comma-separated origins
///
/// Defaults are permissive (Any).
pub fn cors_layer_from_env() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins: Vec<http::HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| s.trim() != "*")
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .filter_map(|p| http::HeaderValue::from_str(p).ok())
                .collect()
        })
        .unwrap_or_default();
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
