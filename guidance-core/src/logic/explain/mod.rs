//! Explain Module - Per-feature attribution for the predicted class
//!
//! Failures here never block a prediction: they degrade to a single
//! placeholder entry with zero impact.

pub mod types;
pub mod names;
pub mod treeshap;
pub mod engine;

pub use types::Explanation;
pub use names::FeatureNames;
pub use engine::{explain, rank_attributions, ExplainError, ExplainerArtifact, TreeExplainer};
