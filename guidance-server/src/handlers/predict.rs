//! Prediction handler

use axum::{extract::{Query, State}, Json};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::models::{PredictQuery, PredictResponse};
use crate::{AppResult, AppState};

/// Run the full pipeline on one set of student attributes
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
    Json(attributes): Json<Map<String, Value>>,
) -> AppResult<Json<PredictResponse>> {
    query.validate()?;

    let request_id = Uuid::new_v4();
    let top_k = query.top_k.unwrap_or(state.config.default_top_k);
    tracing::debug!(%request_id, fields = attributes.len(), top_k, "Prediction request");

    let result = state.service.predict(&attributes, top_k)?;

    tracing::info!(
        %request_id,
        prediction = %result.prediction,
        confidence = result.confidence,
        "Prediction served"
    );

    Ok(Json(PredictResponse::success(result)))
}
