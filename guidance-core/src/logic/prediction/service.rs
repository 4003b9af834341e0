//! Prediction Service
//!
//! normalize -> build row -> transform -> classify -> explain -> assemble.
//! Each call is a single stateless pass over the loaded artifacts.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::types::{assemble, PredictionResult};
use crate::constants::{DEFAULT_EXPLAINER_PATH, DEFAULT_LABELS_PATH, DEFAULT_MODEL_PATH};
use crate::logic::explain::{explain, FeatureNames, TreeExplainer};
use crate::logic::features::build_row;
use crate::logic::model::artifact::{ensure_present, read_json};
use crate::logic::model::{
    ArtifactError, ArtifactKind, InferencePipeline, LabelFile, LabelIndex, ModelError, ModelMetadata,
};
use crate::logic::normalize::normalize;
use crate::logic::schema::{InputPolicy, SchemaVariant};

/// Per-request failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("invalid input: missing fields {missing:?}, malformed fields {malformed:?}")]
    InvalidInput { missing: Vec<String>, malformed: Vec<String> },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("class index {0} has no label")]
    UnknownClass(usize),
}

impl PredictError {
    /// Caller error (bad request) as opposed to a pipeline failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::InvalidInput { .. })
    }
}

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub explainer: PathBuf,
    pub labels: PathBuf,
}

impl ArtifactPaths {
    /// All three artifacts inside one directory, default file names
    pub fn in_dir(dir: &Path) -> Self {
        let file = |default: &str| dir.join(Path::new(default).file_name().unwrap_or_default());
        Self {
            model: file(DEFAULT_MODEL_PATH),
            explainer: file(DEFAULT_EXPLAINER_PATH),
            labels: file(DEFAULT_LABELS_PATH),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            explainer: PathBuf::from(DEFAULT_EXPLAINER_PATH),
            labels: PathBuf::from(DEFAULT_LABELS_PATH),
        }
    }
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug)]
pub struct PredictionService {
    variant: SchemaVariant,
    policy: InputPolicy,
    pipeline: InferencePipeline,
    explainer: TreeExplainer,
    labels: LabelIndex,
    feature_names: Vec<String>,
}

impl PredictionService {
    /// Load every artifact; any failure is fatal for the caller
    pub fn load(paths: &ArtifactPaths, variant: SchemaVariant, policy: InputPolicy) -> Result<Self, ArtifactError> {
        // Report a missing file before parsing anything
        ensure_present(ArtifactKind::Model, &paths.model)?;
        ensure_present(ArtifactKind::Explainer, &paths.explainer)?;
        ensure_present(ArtifactKind::Labels, &paths.labels)?;

        let pipeline = InferencePipeline::load(&paths.model, variant)?;
        let explainer = TreeExplainer::load(&paths.explainer)?;

        log::info!("Loading label index from: {}", paths.labels.display());
        let file: LabelFile = read_json(ArtifactKind::Labels, &paths.labels)?;
        let labels = LabelIndex::try_from(file)
            .map_err(|source| ArtifactError::Invalid { kind: ArtifactKind::Labels, source })?;

        Self::from_parts(variant, policy, pipeline, explainer, labels)
    }

    /// Assemble a service from loaded parts, checking they belong together
    pub fn from_parts(
        variant: SchemaVariant,
        policy: InputPolicy,
        pipeline: InferencePipeline,
        explainer: TreeExplainer,
        labels: LabelIndex,
    ) -> Result<Self, ArtifactError> {
        let metadata = pipeline.metadata();

        if labels.len() != metadata.num_classes {
            return Err(ArtifactError::Mismatch(format!(
                "label index has {} classes, classifier has {}",
                labels.len(),
                metadata.num_classes
            )));
        }

        if let Some(digest) = explainer.classifier_digest() {
            if digest != metadata.digest {
                return Err(ArtifactError::Mismatch(format!(
                    "explainer was fitted against classifier {}, loaded classifier is {}",
                    digest, metadata.digest
                )));
            }
        } else {
            log::warn!("Explainer declares no classifier digest, pairing not verified");
        }

        let feature_names = pipeline.transformer().output_feature_names();
        if explainer.num_features() != feature_names.len() {
            log::warn!(
                "Explainer attributes over {} features, transformer produces {}; explanations will degrade",
                explainer.num_features(),
                feature_names.len()
            );
        }
        if explainer.num_classes() != metadata.num_classes {
            log::warn!(
                "Explainer has {} classes, classifier has {}",
                explainer.num_classes(),
                metadata.num_classes
            );
        }

        log::info!(
            "Prediction service ready: variant={}, policy={}, classes={:?}",
            variant,
            policy,
            labels.classes()
        );

        Ok(Self { variant, policy, pipeline, explainer, labels, feature_names })
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.pipeline.metadata()
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Transformed feature names, in output order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Full prediction for one set of attributes
    pub fn predict(&self, input: &Map<String, Value>, top_k: usize) -> Result<PredictionResult, PredictError> {
        let resolved = normalize(self.variant, input);

        if !resolved.is_complete() {
            if self.policy == InputPolicy::Strict {
                return Err(PredictError::InvalidInput {
                    missing: resolved.missing().iter().map(|f| f.to_string()).collect(),
                    malformed: resolved.malformed().iter().map(|f| f.to_string()).collect(),
                });
            }
            log::debug!(
                "Defaulted fields: missing={:?} malformed={:?} resolved={}",
                resolved.missing(),
                resolved.malformed(),
                resolved.to_json()
            );
        }

        let row = build_row(&resolved, &self.pipeline.transformer().input_columns());
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Feature row: {}", row.to_log_entry());
        }
        let inference = self.pipeline.predict(&row)?;

        let x = inference.transformed.as_slice().unwrap_or_default();
        let explanations = explain(&self.explainer, &self.feature_names, x, inference.class_index, top_k);

        let result = assemble(&self.labels, &inference, explanations)?;
        log::debug!("Prediction: {} ({:.3})", result.prediction, result.confidence);
        Ok(result)
    }
}
