//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "AI Career Guidance API is running successfully.".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        variant: state.service.variant().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
