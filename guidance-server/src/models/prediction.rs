use serde::{Deserialize, Serialize};
use validator::Validate;

use guidance_core::constants::MAX_TOP_K;
use guidance_core::PredictionResult;

/// Query string of `POST /predict`
#[derive(Debug, Deserialize, Default, Validate)]
pub struct PredictQuery {
    /// Number of attributions to return (1..=MAX_TOP_K)
    #[validate(range(min = 1, max = MAX_TOP_K))]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub status: String,
    #[serde(flatten)]
    pub result: PredictionResult,
}

impl PredictResponse {
    pub fn success(result: PredictionResult) -> Self {
        Self { status: "success".to_string(), result }
    }
}
