//! HTTP surface for the prediction service

use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::models::{PerformanceAssessment, PredictionListing, PredictionRecord, PredictionStats};
use crate::risk::ScoringEngine;
use crate::store::RecordStore;
use crate::validate::validate_payload;

const HEALTH_MESSAGE: &str = "HIT Student Performance Prediction System is running";

/// Shared state handed to every handler
#[derive(Debug)]
pub struct AppState {
    pub engine: ScoringEngine,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine,
            store: RecordStore::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/students", get(list_students))
        .route("/api/student/:roll_number", get(get_student))
        .route("/api/statistics", get(statistics));

    if let Some(dir) = &config.static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!("prediction service listening on {}", addr);
    if let Some(dir) = &config.static_dir {
        tracing::info!("serving frontend from {}", dir.display());
    }

    let router = create_router(state, &config);
    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        text.to_string()
    } else {
        "internal error".to_string()
    };
    ApiError::Internal(message).into_response()
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        timestamp: Utc::now(),
    })
}

/// POST /api/predict - score a student and record the result
///
/// The body is parsed by hand so that malformed JSON surfaces as a 500 with
/// the parser's message rather than axum's extractor rejection.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PerformanceAssessment>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)?;
    let input = validate_payload(&payload)?;

    let assessment = state.engine.predict(&input);
    tracing::debug!(
        roll_number = %input.roll_number,
        score = assessment.score,
        risk_level = assessment.risk_level.as_str(),
        "prediction recorded"
    );
    state.store.record(&input, assessment.clone());

    Ok(Json(assessment))
}

/// GET /api/students
pub async fn list_students(State(state): State<Arc<AppState>>) -> Json<PredictionListing> {
    Json(state.store.list_all())
}

/// GET /api/student/:roll_number
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(roll_number): Path<String>,
) -> Result<Json<PredictionRecord>, ApiError> {
    state
        .store
        .find_by_roll_number(&roll_number)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))
}

/// GET /api/statistics
pub async fn statistics(State(state): State<Arc<AppState>>) -> Json<PredictionStats> {
    Json(state.store.statistics())
}
