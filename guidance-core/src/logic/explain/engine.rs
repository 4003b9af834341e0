//! Attribution engine
//!
//! Holds the fitted tree explainer and turns a transformed row into a ranked
//! list of `Explanation`s for the predicted class.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::treeshap::tree_shap;
use super::types::Explanation;
use crate::constants::SHAP_UNAVAILABLE;
use crate::logic::model::artifact::{check_version, read_json};
use crate::logic::model::{ArtifactError, ArtifactKind, ModelError, Tree, TreeError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    #[error("class {class} out of range, explainer has {classes} classes")]
    UnknownClass { class: usize, classes: usize },

    #[error("tree {tree} of class {class}: {source}")]
    Tree {
        class: usize,
        tree: usize,
        #[source]
        source: TreeError,
    },
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// On-disk explainer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainerArtifact {
    pub format_version: u32,
    /// Width of the space it attributes over
    pub num_features: usize,
    /// SHA-256 of the classifier it was fitted against
    #[serde(default)]
    pub classifier_digest: Option<String>,
    pub base_margins: Vec<f64>,
    pub trees: Vec<Vec<Tree>>,
}

#[derive(Debug, Clone)]
pub struct TreeExplainer {
    num_features: usize,
    classifier_digest: Option<String>,
    trees: Vec<Vec<Tree>>,
    expected_values: Vec<f64>,
}

impl TreeExplainer {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        log::info!("Loading explainer artifact from: {}", path.display());
        let artifact: ExplainerArtifact = read_json(ArtifactKind::Explainer, path)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ExplainerArtifact) -> Result<Self, ArtifactError> {
        check_version(ArtifactKind::Explainer, artifact.format_version)?;

        let invalid = |source| ArtifactError::Invalid { kind: ArtifactKind::Explainer, source };
        if artifact.trees.is_empty() || artifact.base_margins.len() != artifact.trees.len() {
            return Err(invalid(ModelError::Invalid(format!(
                "{} base margins for {} tree lists",
                artifact.base_margins.len(),
                artifact.trees.len()
            ))));
        }
        for (class, trees) in artifact.trees.iter().enumerate() {
            for (i, tree) in trees.iter().enumerate() {
                tree.validate(artifact.num_features)
                    .map_err(|source| invalid(ModelError::Tree { class, tree: i, source }))?;
            }
        }

        let expected_values = artifact
            .trees
            .iter()
            .zip(&artifact.base_margins)
            .map(|(trees, base)| base + trees.iter().map(Tree::expected_value).sum::<f64>())
            .collect();

        log::info!(
            "Explainer loaded: {} classes over {} features",
            artifact.trees.len(),
            artifact.num_features
        );

        Ok(Self {
            num_features: artifact.num_features,
            classifier_digest: artifact.classifier_digest,
            trees: artifact.trees,
            expected_values,
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn num_classes(&self) -> usize {
        self.trees.len()
    }

    pub fn classifier_digest(&self) -> Option<&str> {
        self.classifier_digest.as_deref()
    }

    /// Base value of a class: the margin before any feature is known
    pub fn expected_value(&self, class: usize) -> Option<f64> {
        self.expected_values.get(class).copied()
    }

    /// One signed contribution per feature, `num_features` long
    pub fn shap_values(&self, x: &[f64], class: usize) -> Result<Vec<f64>, ExplainError> {
        let trees = self.trees.get(class).ok_or(ExplainError::UnknownClass {
            class,
            classes: self.trees.len(),
        })?;

        let mut phi = vec![0.0; self.num_features];
        for (i, tree) in trees.iter().enumerate() {
            tree_shap(tree, x, &mut phi).map_err(|source| ExplainError::Tree { class, tree: i, source })?;
        }
        Ok(phi)
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Explain the predicted class; never fails, degrades to a placeholder
pub fn explain(
    explainer: &TreeExplainer,
    names: &[String],
    x: &[f64],
    class: usize,
    top_k: usize,
) -> Vec<Explanation> {
    match explainer.shap_values(x, class) {
        Ok(contributions) => rank_attributions(names, &contributions, top_k),
        Err(e) => {
            log::warn!("Explainer could not evaluate row: {}", e);
            vec![Explanation::placeholder(SHAP_UNAVAILABLE)]
        }
    }
}

/// Pair names with contributions, keep the `top_k` largest by magnitude
pub fn rank_attributions(names: &[String], contributions: &[f64], top_k: usize) -> Vec<Explanation> {
    if names.len() != contributions.len() {
        log::warn!(
            "Feature name count ({}) does not match contribution count ({})",
            names.len(),
            contributions.len()
        );
        return vec![Explanation::placeholder(format!(
            "FEATURE_MISMATCH (expected {} names, got {})",
            names.len(),
            contributions.len()
        ))];
    }

    let mut ranked: Vec<Explanation> = names
        .iter()
        .zip(contributions)
        .map(|(name, impact)| Explanation::new(name.clone(), *impact))
        .collect();

    // Stable: equal magnitudes keep feature order
    ranked.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    ranked.truncate(top_k);
    ranked
}
