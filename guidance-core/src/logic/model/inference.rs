//! Inference Pipeline - transformer + classifier from one artifact
//!
//! Loaded once at start, immutable afterwards. Deterministic: the same row
//! always yields the same class and probabilities.

use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::artifact::{check_version, read_json, ArtifactError, ArtifactKind};
use super::classifier::{argmax, TreeEnsemble};
use super::transformer::ColumnTransformer;
use super::ModelError;
use crate::logic::features::FeatureRow;
use crate::logic::schema::{expected_columns, validate_layout, SchemaVariant};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub variant: SchemaVariant,
    /// Layout hash of the schema the model was fitted against
    #[serde(default)]
    pub layout_hash: Option<u32>,
    pub transformer: ColumnTransformer,
    pub classifier: TreeEnsemble,
}

/// Model metadata, for logs and the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub source: String,
    pub variant: SchemaVariant,
    pub input_columns: usize,
    pub output_width: usize,
    pub num_classes: usize,
    pub num_trees: usize,
    pub digest: String,
    pub loaded_at: DateTime<Utc>,
}

/// One evaluated row
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub class_index: usize,
    pub probabilities: Vec<f64>,
    pub margins: Vec<f64>,
    /// Transformer output, the explainer's input space
    pub transformed: Array1<f64>,
}

impl Inference {
    /// Probability of the predicted class
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.class_index).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct InferencePipeline {
    transformer: ColumnTransformer,
    classifier: TreeEnsemble,
    metadata: ModelMetadata,
}

impl InferencePipeline {
    /// Load and validate the model artifact
    pub fn load(path: &Path, variant: SchemaVariant) -> Result<Self, ArtifactError> {
        log::info!("Loading model artifact from: {}", path.display());
        let artifact: ModelArtifact = read_json(ArtifactKind::Model, path)?;
        Self::from_artifact(artifact, &path.display().to_string(), variant)
    }

    pub fn from_artifact(
        artifact: ModelArtifact,
        source: &str,
        variant: SchemaVariant,
    ) -> Result<Self, ArtifactError> {
        check_version(ArtifactKind::Model, artifact.format_version)?;

        if artifact.variant != variant {
            return Err(ArtifactError::Mismatch(format!(
                "model was fitted for the '{}' schema, service is configured for '{}'",
                artifact.variant, variant
            )));
        }

        if let Some(hash) = artifact.layout_hash {
            if let Err(e) = validate_layout(variant, hash) {
                log::warn!("{}", e);
            }
        }

        let invalid = |source| ArtifactError::Invalid { kind: ArtifactKind::Model, source };
        artifact.transformer.validate().map_err(invalid)?;
        let width = artifact.transformer.output_width();
        artifact.classifier.validate(width).map_err(invalid)?;

        let known = expected_columns(variant);
        let unfed: Vec<&str> = artifact
            .transformer
            .input_columns()
            .iter()
            .map(|c| c.name)
            .filter(|name| !known.iter().any(|k| k == name))
            .collect();
        if !unfed.is_empty() {
            log::warn!("Transformer columns not produced by the '{}' schema (always defaulted): {:?}", variant, unfed);
        }

        let metadata = ModelMetadata {
            source: source.to_string(),
            variant,
            input_columns: artifact.transformer.input_columns().len(),
            output_width: width,
            num_classes: artifact.classifier.num_classes,
            num_trees: artifact.classifier.trees.iter().map(Vec::len).sum(),
            digest: artifact.classifier.digest().map_err(invalid)?,
            loaded_at: Utc::now(),
        };

        log::info!(
            "Model loaded: {} classes, {} trees, {} -> {} features",
            metadata.num_classes,
            metadata.num_trees,
            metadata.input_columns,
            metadata.output_width
        );

        Ok(Self {
            transformer: artifact.transformer,
            classifier: artifact.classifier,
            metadata,
        })
    }

    pub fn transformer(&self) -> &ColumnTransformer {
        &self.transformer
    }

    pub fn classifier(&self) -> &TreeEnsemble {
        &self.classifier
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Transform the row, then classify it
    pub fn predict(&self, row: &FeatureRow) -> Result<Inference, ModelError> {
        let transformed = self.transformer.transform(row)?;
        let x = transformed.as_slice().ok_or(ModelError::NoPrediction)?;

        let margins = self.classifier.margins(x)?;
        let probabilities = super::classifier::softmax(&margins);
        let class_index = argmax(&probabilities).ok_or(ModelError::NoPrediction)?;

        Ok(Inference { class_index, probabilities, margins, transformed })
    }
}
