//! Decision trees of the boosted ensemble
//!
//! Nodes live in a flat vector, node 0 is the root. A split sends `x` left
//! when `x < threshold`. Every node carries its cover (training weight that
//! reached it); the explainer needs covers, the classifier ignores them.

use serde::{Deserialize, Serialize};

/// Structural fault in a tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node {node} has invalid child index {child}")]
    BadChild { node: usize, child: i32 },

    #[error("internal node {node} has no split feature")]
    NoFeature { node: usize },

    #[error("leaf node {node} has no value")]
    NoLeafValue { node: usize },

    #[error("node {node} has non-positive cover {cover}")]
    BadCover { node: usize, cover: f64 },

    #[error("node {node} splits on feature {feature}, row has {width}")]
    FeatureOutOfRange { node: usize, feature: usize, width: usize },

    #[error("traversal exceeded {0} steps (cycle?)")]
    Cycle(usize),
}

/// A tree node (internal or leaf)
///
/// Internal: `feature >= 0`, `left`/`right` index into the node vector.
/// Leaf: `feature == -1`, `leaf` holds the margin contribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    #[serde(default = "no_child")]
    pub left: i32,

    #[serde(default = "no_child")]
    pub right: i32,

    #[serde(default = "no_child", alias = "feature_idx")]
    pub feature: i32,

    #[serde(default)]
    pub threshold: f64,

    #[serde(default)]
    pub leaf: Option<f64>,

    pub cover: f64,
}

fn no_child() -> i32 {
    -1
}

impl Node {
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize, cover: f64) -> Self {
        Self {
            left: left as i32,
            right: right as i32,
            feature: feature as i32,
            threshold,
            leaf: None,
            cover,
        }
    }

    pub fn leaf(value: f64, cover: f64) -> Self {
        Self {
            left: -1,
            right: -1,
            feature: -1,
            threshold: 0.0,
            leaf: Some(value),
            cover,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature < 0
    }

    /// Split feature of an internal node
    pub fn split_feature(&self) -> Option<usize> {
        (self.feature >= 0).then_some(self.feature as usize)
    }

    /// (hot, cold) children for a feature value
    pub fn route(&self, value: f64) -> (usize, usize) {
        if value < self.threshold {
            (self.left as usize, self.right as usize)
        } else {
            (self.right as usize, self.left as usize)
        }
    }
}

/// One regression tree of the ensemble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Leaf value reached by `features`
    pub fn evaluate(&self, features: &[f64]) -> Result<f64, TreeError> {
        let mut idx = 0usize;

        // A valid tree never needs more steps than it has nodes
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(idx).ok_or(TreeError::Empty)?;

            let Some(feature) = node.split_feature() else {
                return node.leaf.ok_or(TreeError::NoLeafValue { node: idx });
            };

            let value = *features.get(feature).ok_or(TreeError::FeatureOutOfRange {
                node: idx,
                feature,
                width: features.len(),
            })?;

            idx = node.route(value).0;
        }

        Err(TreeError::Cycle(self.nodes.len()))
    }

    /// Cover-weighted mean leaf value (the tree's expected output)
    pub fn expected_value(&self) -> f64 {
        self.subtree_mean(0, 0)
    }

    fn subtree_mean(&self, idx: usize, depth: usize) -> f64 {
        let Some(node) = self.nodes.get(idx) else { return 0.0 };
        if node.is_leaf() || depth > self.nodes.len() {
            return node.leaf.unwrap_or(0.0);
        }

        let (left, right) = (node.left as usize, node.right as usize);
        let left_cover = self.nodes.get(left).map_or(0.0, |n| n.cover);
        let right_cover = self.nodes.get(right).map_or(0.0, |n| n.cover);
        let total = left_cover + right_cover;
        if total <= 0.0 {
            return 0.0;
        }

        (left_cover * self.subtree_mean(left, depth + 1) + right_cover * self.subtree_mean(right, depth + 1)) / total
    }

    /// Structural checks; `width` bounds the split feature indices
    pub fn validate(&self, width: usize) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if !(node.cover > 0.0) {
                return Err(TreeError::BadCover { node: i, cover: node.cover });
            }

            if node.is_leaf() {
                if node.leaf.is_none() {
                    return Err(TreeError::NoLeafValue { node: i });
                }
                continue;
            }

            for child in [node.left, node.right] {
                // Children must come after their parent, which also rules out cycles
                if child <= i as i32 || child as usize >= self.nodes.len() {
                    return Err(TreeError::BadChild { node: i, child });
                }
            }

            let feature = node.split_feature().ok_or(TreeError::NoFeature { node: i })?;
            if feature >= width {
                return Err(TreeError::FeatureOutOfRange { node: i, feature, width });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// f0 < 0.5 ? (f1 < 2.0 ? -1.0 : 0.5) : 2.0
    fn sample_tree() -> Tree {
        Tree::new(vec![
            Node::split(0, 0.5, 1, 2, 10.0),
            Node::split(1, 2.0, 3, 4, 6.0),
            Node::leaf(2.0, 4.0),
            Node::leaf(-1.0, 3.0),
            Node::leaf(0.5, 3.0),
        ])
    }

    #[test]
    fn test_node_creation() {
        let internal = Node::split(3, 1.5, 1, 2, 8.0);
        assert!(!internal.is_leaf());
        assert_eq!(internal.split_feature(), Some(3));

        let leaf = Node::leaf(-0.25, 2.0);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.split_feature(), None);
    }

    #[test]
    fn test_tree_evaluation() {
        let tree = sample_tree();
        assert_eq!(tree.evaluate(&[0.0, 1.0]), Ok(-1.0));
        assert_eq!(tree.evaluate(&[0.0, 2.0]), Ok(0.5)); // threshold goes right
        assert_eq!(tree.evaluate(&[0.9, 0.0]), Ok(2.0));
    }

    #[test]
    fn test_evaluation_row_too_narrow() {
        let tree = sample_tree();
        assert!(matches!(
            tree.evaluate(&[0.0]),
            Err(TreeError::FeatureOutOfRange { feature: 1, width: 1, .. })
        ));
    }

    #[test]
    fn test_expected_value() {
        // left subtree: (3 * -1 + 3 * 0.5) / 6 = -0.25 ; root: (6 * -0.25 + 4 * 2) / 10
        let expected = (6.0 * -0.25 + 4.0 * 2.0) / 10.0;
        assert!((sample_tree().expected_value() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_validation() {
        let tree = sample_tree();
        assert!(tree.validate(2).is_ok());
        assert!(matches!(tree.validate(1), Err(TreeError::FeatureOutOfRange { .. })));

        assert_eq!(Tree::new(vec![]).validate(2), Err(TreeError::Empty));

        let cyclic = Tree::new(vec![Node::split(0, 0.5, 0, 1, 2.0), Node::leaf(1.0, 1.0)]);
        assert!(matches!(cyclic.validate(1), Err(TreeError::BadChild { child: 0, .. })));

        let no_cover = Tree::new(vec![Node::leaf(1.0, 0.0)]);
        assert!(matches!(no_cover.validate(1), Err(TreeError::BadCover { .. })));
    }

    #[test]
    fn test_node_json_defaults() {
        let leaf: Node = serde_json::from_str(r#"{"leaf": 0.3, "cover": 5}"#).unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.leaf, Some(0.3));

        let split: Node =
            serde_json::from_str(r#"{"feature": 2, "threshold": 1.5, "left": 1, "right": 2, "cover": 5}"#).unwrap();
        assert_eq!(split.split_feature(), Some(2));
    }
}
