//! Boosted tree ensemble with softmax output
//!
//! One tree list per class. `margin(c) = base_margins[c] + Σ trees[c](x)`,
//! probabilities are the softmax of the margins.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::tree::Tree;
use super::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEnsemble {
    pub num_classes: usize,
    pub base_margins: Vec<f64>,
    /// `trees[class]` is the tree list of that class
    pub trees: Vec<Vec<Tree>>,
}

impl TreeEnsemble {
    /// Raw per-class scores
    pub fn margins(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        self.trees
            .iter()
            .zip(&self.base_margins)
            .enumerate()
            .map(|(class, (trees, base))| {
                trees.iter().enumerate().try_fold(*base, |acc, (i, tree)| {
                    tree.evaluate(x)
                        .map(|leaf| acc + leaf)
                        .map_err(|source| ModelError::Tree { class, tree: i, source })
                })
            })
            .collect()
    }

    /// SHA-256 (hex) of the compact JSON form, used to pair explainers
    pub fn digest(&self) -> Result<String, ModelError> {
        let bytes = serde_json::to_vec(self).map_err(|e| ModelError::Invalid(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn validate(&self, width: usize) -> Result<(), ModelError> {
        if self.num_classes < 2 {
            return Err(ModelError::Invalid(format!("need at least 2 classes, got {}", self.num_classes)));
        }
        if self.base_margins.len() != self.num_classes || self.trees.len() != self.num_classes {
            return Err(ModelError::Invalid(format!(
                "{} classes but {} base margins and {} tree lists",
                self.num_classes,
                self.base_margins.len(),
                self.trees.len()
            )));
        }
        for (class, trees) in self.trees.iter().enumerate() {
            for (i, tree) in trees.iter().enumerate() {
                tree.validate(width)
                    .map_err(|source| ModelError::Tree { class, tree: i, source })?;
            }
        }
        Ok(())
    }
}

/// Numerically stable softmax
pub fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value, lowest index on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
