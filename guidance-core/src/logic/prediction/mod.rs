//! Prediction Module - Service context and response assembly
//!
//! `PredictionService` is built once from the artifact files and then shared
//! read-only by every request.

pub mod types;
pub mod service;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;


pub use types::{assemble, PredictionResult};
pub use service::{ArtifactPaths, PredictError, PredictionService};
pub use crate::logic::explain::Explanation;
