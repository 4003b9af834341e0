//! Student Guidance API Server
//!
//! Serves career (B.Tech) or performance (Math) predictions with ranked
//! feature attributions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    GUIDANCE SERVER                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌──────────────────────────────┐   │
//! │  │  HTTP     │        │  PredictionService (Arc)     │   │
//! │  │  (Axum)   │ ─────► │  normalize → model → explain │   │
//! │  └───────────┘        └──────────────┬───────────────┘   │
//! │                                      ▼                   │
//! │                     model.json  explainer.json  labels   │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guidance_core::logic::schema::LayoutInfo;
use guidance_core::PredictionService;

pub use config::{Config, LogFormat};
pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "guidance_server=debug,guidance_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing(LogFormat::from_env());

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;

    tracing::info!("Guidance Server starting...");
    tracing::info!(
        "Variant: {}, input policy: {}, environment: {}",
        config.variant,
        config.input_policy,
        config.environment
    );
    if config.is_production() && config.log_format == LogFormat::Pretty {
        tracing::warn!("Pretty logs in production, set LOG_FORMAT=json for structured output");
    }

    // Load artifacts (fatal if any is missing or invalid)
    let state = AppState::from_config(config.clone())?;

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: Config,
}

impl AppState {
    /// Load the prediction service from the configured artifacts
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let paths = config.artifact_paths();
        let service = PredictionService::load(&paths, config.variant, config.input_policy)
            .context("Failed to load model artifacts")?;

        let metadata = service.metadata();
        tracing::info!(
            "Model {} ({} trees, digest {}) loaded at {}",
            metadata.source,
            metadata.num_trees,
            &metadata.digest[..12.min(metadata.digest.len())],
            metadata.loaded_at
        );

        let layout = LayoutInfo::for_variant(config.variant);
        tracing::debug!("Schema layout {:08x}: {} columns", layout.hash, layout.column_count);

        Ok(Self { service: Arc::new(service), config })
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
