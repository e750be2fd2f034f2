//! Smart Energy API Server
//!
//! REST API for energy consumption predictions, the chat assistant, user
//! reviews and the dashboard chart data.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
mod routes;

pub use crate::config::ServerConfig;
pub use crate::error::ServerError;

use assistant::{ChatResponder, ProviderHandle};
use feature_engine::FeatureBuilder;
use inference_engine::{ModelHandle, PredictionEngine};
use recommendation::RecommendationEngine;
use storage::ReviewStore;

/// Application state shared across handlers
pub struct AppState {
    /// Feature row builder
    pub features: FeatureBuilder,
    /// Model-first predictor
    pub predictor: PredictionEngine,
    /// Usage annotations and recommendations
    pub advisor: RecommendationEngine,
    /// Chat assistant
    pub chat: ChatResponder,
    /// Review document
    pub reviews: ReviewStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from already resolved collaborators
    pub fn new(predictor: PredictionEngine, chat: ChatResponder, reviews: ReviewStore) -> Self {
        Self {
            features: FeatureBuilder::new(),
            predictor,
            advisor: RecommendationEngine::default(),
            chat,
            reviews,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Resolve the model and chat provider once and build the state
    pub fn from_config(config: &ServerConfig) -> Self {
        let model = ModelHandle::load(&config.model_path);
        let provider = ProviderHandle::resolve(&config.chat_config());
        Self::new(
            PredictionEngine::new(model),
            ChatResponder::new(provider),
            ReviewStore::open(&config.reviews_path),
        )
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    /// `loaded` or `fallback`
    pub model: String,
    /// `gemini` or `fallback`
    pub chat: String,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/predict", post(routes::predict::predict))
        .route("/api/chatbot", post(routes::chat::chatbot))
        .route("/api/submit-review", post(routes::reviews::submit_review))
        .route("/api/get-reviews", get(routes::reviews::get_reviews))
        .route("/api/charts-data", get(routes::charts::charts_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let model = if state.predictor.has_model() { "loaded" } else { "fallback" };
    let chat = if state.chat.has_provider() { "gemini" } else { "fallback" };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            model: model.to_string(),
            chat: chat.to_string(),
        },
    })
}

/// Initialize logging
pub fn init_logging(level: Level, json: bool) -> Result<(), ServerError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| ServerError::Logging(e.to_string()))
}

/// Run the server until ctrl-c
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::from_config(&config));

    info!(
        "Prediction model: {}",
        if state.predictor.has_model() { "loaded" } else { "using fallback predictions" }
    );
    info!(
        "Chat assistant: {}",
        if state.chat.has_provider() { "Gemini" } else { "using fallback chatbot" }
    );
    info!("CORS: {}", if config.cors_enabled { "enabled" } else { "disabled" });

    let mut app = create_router(state);
    if config.cors_enabled {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;

    info!("Starting API server on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
