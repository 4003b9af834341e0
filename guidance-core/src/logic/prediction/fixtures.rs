//! Small hand-built artifacts for tests
//!
//! Enabled with the `test-fixtures` feature so the server's tests can load
//! the same artifacts from disk.

use std::fs;
use std::io;
use std::path::Path;

use super::service::{ArtifactPaths, PredictionService};
use crate::constants::ARTIFACT_FORMAT_VERSION;
use crate::logic::explain::{ExplainerArtifact, TreeExplainer};
use crate::logic::model::{
    ArtifactError, ArtifactKind, CategoricalColumn, ColumnTransformer, InferencePipeline, LabelFile, LabelIndex,
    ModelArtifact, Node, NumericColumn, Tree, TreeEnsemble,
};
use crate::logic::schema::{layout_hash, InputPolicy, SchemaVariant};

/// Stump on one feature: `x < threshold` -> `low`, else `high`
pub fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> Tree {
    Tree::new(vec![
        Node::split(feature, threshold, 1, 2, 10.0),
        Node::leaf(low, 6.0),
        Node::leaf(high, 4.0),
    ])
}

fn numeric(column: &str, mean: f64, scale: f64) -> NumericColumn {
    NumericColumn { column: column.to_string(), mean, scale }
}

fn categorical(column: &str, categories: &[&str]) -> CategoricalColumn {
    CategoricalColumn {
        column: column.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

// ============================================================================
// B.TECH
// ============================================================================

/// Label encoder order (sorted)
pub fn btech_labels() -> Vec<String> {
    [
        "AI/ML Engineer",
        "Cyber Security Engineer",
        "Data Analyst",
        "DevOps Engineer",
        "Software Engineer",
        "Web Developer",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// Output layout (width 10):
/// 0 CGPA, 1 DSA, 2 coding hours, 3 aptitude, 4-5 Gender, 6-9 English
pub fn btech_model_artifact() -> ModelArtifact {
    let transformer = ColumnTransformer {
        numeric: vec![
            numeric("CGPA", 7.5, 1.0),
            numeric("Data Structures And Algorithm Marks", 70.0, 10.0),
            numeric("Coding practice hours/week", 6.0, 3.0),
            numeric("Aptitude score", 65.0, 10.0),
        ],
        categorical: vec![
            categorical("Gender", &["Female", "Male"]),
            categorical("English proficiency", &["Excellent", "Fair", "Good", "Poor"]),
        ],
    };

    let classifier = TreeEnsemble {
        num_classes: 6,
        base_margins: vec![0.0; 6],
        trees: vec![
            vec![stump(1, 1.0, -0.5, 1.5), stump(0, 1.0, -0.2, 0.6)],
            vec![stump(3, 0.0, -0.3, 0.2)],
            vec![stump(2, 0.0, 0.3, -0.3)],
            vec![stump(8, 0.5, 0.0, 0.4)],
            vec![stump(1, 0.0, -0.1, 0.5), stump(2, 1.0, 0.0, 0.7)],
            vec![stump(2, -0.5, -0.4, 0.3)],
        ],
    };

    ModelArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        variant: SchemaVariant::Btech,
        layout_hash: Some(layout_hash(SchemaVariant::Btech)),
        transformer,
        classifier,
    }
}

// ============================================================================
// MATH
// ============================================================================

pub fn math_labels() -> Vec<String> {
    ["At Risk", "Average", "Excellent", "Good"].iter().map(|c| c.to_string()).collect()
}

/// Output layout (width 7): G1, G2, failures, grade_mean, grade_trend, higher
pub fn math_model_artifact() -> ModelArtifact {
    let transformer = ColumnTransformer {
        numeric: vec![
            numeric("G1", 11.0, 4.0),
            numeric("G2", 11.0, 4.0),
            numeric("failures", 0.5, 1.0),
            numeric("grade_mean", 11.0, 4.0),
            numeric("grade_trend", 0.0, 2.0),
        ],
        categorical: vec![categorical("higher", &["no", "yes"])],
    };

    let classifier = TreeEnsemble {
        num_classes: 4,
        base_margins: vec![0.0; 4],
        trees: vec![
            vec![stump(3, -0.25, 1.5, -1.0)],
            vec![stump(3, 0.0, 0.5, -0.5)],
            vec![stump(3, 1.25, -1.0, 2.0)],
            vec![stump(3, 0.25, -0.5, 1.0)],
        ],
    };

    ModelArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        variant: SchemaVariant::Math,
        layout_hash: Some(layout_hash(SchemaVariant::Math)),
        transformer,
        classifier,
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Explainer over the model's own trees, paired by digest
pub fn explainer_for(model: &ModelArtifact) -> ExplainerArtifact {
    ExplainerArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        num_features: model.transformer.output_width(),
        classifier_digest: model.classifier.digest().ok(),
        base_margins: model.classifier.base_margins.clone(),
        trees: model.classifier.trees.clone(),
    }
}

/// Service built in memory from artifacts
pub fn service_from(
    model: ModelArtifact,
    explainer: ExplainerArtifact,
    labels: Vec<String>,
    policy: InputPolicy,
) -> Result<PredictionService, ArtifactError> {
    let variant = model.variant;
    let pipeline = InferencePipeline::from_artifact(model, "fixture", variant)?;
    let explainer = TreeExplainer::from_artifact(explainer)?;
    let labels = LabelIndex::new(labels)
        .map_err(|source| ArtifactError::Invalid { kind: ArtifactKind::Labels, source })?;
    PredictionService::from_parts(variant, policy, pipeline, explainer, labels)
}

pub fn btech_service(policy: InputPolicy) -> Result<PredictionService, ArtifactError> {
    let model = btech_model_artifact();
    let explainer = explainer_for(&model);
    service_from(model, explainer, btech_labels(), policy)
}

pub fn math_service(policy: InputPolicy) -> Result<PredictionService, ArtifactError> {
    let model = math_model_artifact();
    let explainer = explainer_for(&model);
    service_from(model, explainer, math_labels(), policy)
}

/// Write the three artifacts into `dir` under their default names
pub fn write_artifacts(
    dir: &Path,
    model: &ModelArtifact,
    explainer: &ExplainerArtifact,
    labels: &[String],
) -> io::Result<ArtifactPaths> {
    let paths = ArtifactPaths::in_dir(dir);
    let labels = LabelFile { classes: labels.to_vec() };

    fs::write(&paths.model, serde_json::to_vec_pretty(model)?)?;
    fs::write(&paths.explainer, serde_json::to_vec_pretty(explainer)?)?;
    fs::write(&paths.labels, serde_json::to_vec_pretty(&labels)?)?;

    Ok(paths)
}
