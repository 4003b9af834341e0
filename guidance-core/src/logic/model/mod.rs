//! Model Module - Fitted inference pipeline
//!
//! Column transformer + boosted tree ensemble, loaded once from JSON
//! artifacts and shared read-only afterwards.

pub mod artifact;
pub mod tree;
pub mod transformer;
pub mod classifier;
pub mod labels;
pub mod inference;

// Re-export common types
pub use artifact::{ArtifactError, ArtifactKind};
pub use tree::{Node, Tree, TreeError};
pub use transformer::{CategoricalColumn, ColumnTransformer, NumericColumn};
pub use classifier::{argmax, softmax, TreeEnsemble};
pub use labels::{LabelFile, LabelIndex};
pub use inference::{Inference, InferencePipeline, ModelArtifact, ModelMetadata};

/// Model evaluation / validation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("feature row has no column '{0}'")]
    MissingColumn(String),

    #[error("tree {tree} of class {class}: {source}")]
    Tree {
        class: usize,
        tree: usize,
        #[source]
        source: TreeError,
    },

    #[error("classifier produced no probabilities")]
    NoPrediction,

    #[error("{0}")]
    Invalid(String),
}
