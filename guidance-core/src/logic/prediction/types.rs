use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::service::PredictError;
use crate::logic::explain::Explanation;
use crate::logic::model::{Inference, LabelIndex};

/// Final result of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: f64,
    /// Class name -> probability, every class present
    pub probabilities: BTreeMap<String, f64>,
    pub explanations: Vec<Explanation>,
}

/// Join label, probabilities and explanations into the result
pub fn assemble(
    labels: &LabelIndex,
    inference: &Inference,
    explanations: Vec<Explanation>,
) -> Result<PredictionResult, PredictError> {
    let prediction = labels
        .name(inference.class_index)
        .ok_or(PredictError::UnknownClass(inference.class_index))?
        .to_string();

    let probabilities = labels
        .classes()
        .iter()
        .cloned()
        .zip(inference.probabilities.iter().copied())
        .collect();

    Ok(PredictionResult {
        prediction,
        confidence: inference.confidence(),
        probabilities,
        explanations,
    })
}
