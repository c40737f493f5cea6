//! reel-api - HTTP API server for reelfinder

mod compose;
mod pipeline;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use pipeline::Pipeline;
use reel_catalog::{CatalogClient, CatalogSnapshot, DetailsClient, Enricher, LiveSource};
use reel_core::{defaults, FilterContext};
use reel_inference::{FireworksBackend, KeywordAnalyzer, LlmAnalyzer, LlmRanker, RatingRanker};

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "reel_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reel_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("reel-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
    let port: u16 = defaults::env_parse("PORT", defaults::SERVER_PORT);
    let mode = std::env::var("PIPELINE_MODE").unwrap_or_else(|_| "live".to_string());

    let mut pipeline = build_pipeline(&mode)?;
    if let Ok(raw) = std::env::var("PAGE_SIZE") {
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => pipeline.page_size = n,
            _ => warn!("Invalid PAGE_SIZE '{}', using {}", raw, pipeline.page_size),
        }
    }
    info!(
        mode = %mode,
        analyzer = pipeline.analyzer.name(),
        source = pipeline.source.name(),
        ranker = pipeline.ranker.name(),
        page_size = pipeline.page_size,
        "Pipeline assembled"
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/ask", post(ask))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// PIPELINE ASSEMBLY
// =============================================================================

/// Assemble the pipeline for the configured mode.
///
/// `live` (the default) analyzes and ranks with the chat model and gathers
/// candidates from the network catalog; it requires `FIREWORKS_API_KEY` and
/// `RAPIDAPI_KEY`. `offline` runs the keyword analyzer and rating ranker
/// over a local snapshot with no outbound calls; it requires
/// `CATALOG_SNAPSHOT`.
fn build_pipeline(mode: &str) -> anyhow::Result<Pipeline> {
    let pipeline = match mode {
        "offline" => {
            let path = std::env::var("CATALOG_SNAPSHOT").map_err(|_| {
                anyhow::anyhow!("CATALOG_SNAPSHOT must be set when PIPELINE_MODE=offline")
            })?;
            let snapshot = CatalogSnapshot::load(&path)?;
            Pipeline {
                analyzer: Arc::new(KeywordAnalyzer::new()),
                source: Arc::new(snapshot),
                enricher: Enricher::new(None),
                ranker: Arc::new(RatingRanker::new()),
                page_size: defaults::OFFLINE_PAGE_SIZE,
            }
        }
        "live" => {
            if std::env::var("FIREWORKS_API_KEY").is_err() {
                anyhow::bail!("FIREWORKS_API_KEY must be set when PIPELINE_MODE=live");
            }
            if std::env::var("RAPIDAPI_KEY").is_err() {
                anyhow::bail!("RAPIDAPI_KEY must be set when PIPELINE_MODE=live");
            }
            let backend = Arc::new(FireworksBackend::from_env()?);
            let catalog = CatalogClient::from_env()?;
            let details = if std::env::var("OMDB_API_KEY").is_ok() {
                Some(DetailsClient::from_env()?)
            } else {
                info!("OMDB_API_KEY not set, enrichment uses catalog fields only");
                None
            };
            Pipeline {
                analyzer: Arc::new(LlmAnalyzer::new(backend.clone())),
                source: Arc::new(LiveSource::new(catalog)),
                enricher: Enricher::new(details),
                ranker: Arc::new(LlmRanker::new(backend)),
                page_size: defaults::LIVE_PAGE_SIZE,
            }
        }
        other => anyhow::bail!("Unknown PIPELINE_MODE: {}", other),
    };
    Ok(pipeline)
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// One conversational search turn.
///
/// The body is read leniently: `text` must be a non-blank string; a
/// malformed `context` decodes to no context rather than rejecting the
/// request. An unparseable body maps into the same `{"error": ...}`
/// envelope as every other rejection instead of axum's plain-text reply.
async fn ask(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let text = body
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if text.is_empty() {
        return Err(ApiError::BadRequest("Missing text".to_string()));
    }

    let prior = body
        .get("context")
        .cloned()
        .and_then(|v| serde_json::from_value::<FilterContext>(v).ok());

    let request_id = Uuid::new_v4();
    info!(
        request_id = %request_id,
        text_len = text.len(),
        has_context = prior.is_some(),
        "Ask request received"
    );

    let response = state
        .pipeline
        .ask(request_id, text, prior.as_ref())
        .await?;

    info!(
        request_id = %request_id,
        results = response.results.len(),
        "Ask request complete"
    );
    Ok(Json(response))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(reel_core::Error),
}

impl From<reel_core::Error> for ApiError {
    fn from(err: reel_core::Error) -> Self {
        match &err {
            reel_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(err) => {
                // Detail stays in the server log, never in the response body.
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
