//! Path-dependent TreeSHAP
//!
//! Exact Shapley values for a single tree, conditioning on the training
//! distribution through node covers. For every tree:
//! `tree.expected_value() + Σ φ = tree.evaluate(x)`.

use crate::logic::model::{Tree, TreeError};

#[derive(Debug, Clone, Copy)]
struct PathElement {
    /// `None` for the root sentinel
    feature: Option<usize>,
    zero_fraction: f64,
    one_fraction: f64,
    weight: f64,
}

/// Add the contributions of `tree` at `x` into `phi`
///
/// `phi` must be at least as wide as the highest split feature.
pub fn tree_shap(tree: &Tree, x: &[f64], phi: &mut [f64]) -> Result<(), TreeError> {
    if tree.nodes.is_empty() {
        return Err(TreeError::Empty);
    }
    let mut walker = Walker { tree, x, phi, depth_limit: tree.nodes.len() };
    walker.recurse(0, Vec::with_capacity(8), 1.0, 1.0, None, 0)
}

struct Walker<'a> {
    tree: &'a Tree,
    x: &'a [f64],
    phi: &'a mut [f64],
    depth_limit: usize,
}

impl Walker<'_> {
    fn recurse(
        &mut self,
        idx: usize,
        mut path: Vec<PathElement>,
        zero_fraction: f64,
        one_fraction: f64,
        feature: Option<usize>,
        depth: usize,
    ) -> Result<(), TreeError> {
        if depth > self.depth_limit {
            return Err(TreeError::Cycle(self.depth_limit));
        }

        let tree = self.tree;
        let node = tree.nodes.get(idx).ok_or(TreeError::BadChild { node: idx, child: idx as i32 })?;
        extend_path(&mut path, zero_fraction, one_fraction, feature);

        let Some(split) = node.split_feature() else {
            let leaf = node.leaf.ok_or(TreeError::NoLeafValue { node: idx })?;
            for i in 1..path.len() {
                let w = unwound_path_sum(&path, i);
                let el = path[i];
                if let Some(f) = el.feature {
                    let slot = self.phi.get_mut(f).ok_or(TreeError::FeatureOutOfRange {
                        node: idx,
                        feature: f,
                        width: self.x.len(),
                    })?;
                    *slot += w * (el.one_fraction - el.zero_fraction) * leaf;
                }
            }
            return Ok(());
        };

        let value = *self.x.get(split).ok_or(TreeError::FeatureOutOfRange {
            node: idx,
            feature: split,
            width: self.x.len(),
        })?;
        let (hot, cold) = node.route(value);
        let cover = |child: usize| {
            tree.nodes
                .get(child)
                .map(|n| n.cover)
                .ok_or(TreeError::BadChild { node: idx, child: child as i32 })
        };
        let hot_zero = cover(hot)? / node.cover;
        let cold_zero = cover(cold)? / node.cover;

        // A feature already on the path is folded back into a single element
        let (mut incoming_zero, mut incoming_one) = (1.0, 1.0);
        if let Some(pos) = path.iter().position(|el| el.feature == Some(split)) {
            incoming_zero = path[pos].zero_fraction;
            incoming_one = path[pos].one_fraction;
            unwind_path(&mut path, pos);
        }

        self.recurse(hot, path.clone(), hot_zero * incoming_zero, incoming_one, Some(split), depth + 1)?;
        self.recurse(cold, path, cold_zero * incoming_zero, 0.0, Some(split), depth + 1)
    }
}

fn extend_path(path: &mut Vec<PathElement>, zero_fraction: f64, one_fraction: f64, feature: Option<usize>) {
    let depth = path.len();
    path.push(PathElement {
        feature,
        zero_fraction,
        one_fraction,
        weight: if depth == 0 { 1.0 } else { 0.0 },
    });

    let denom = (depth + 1) as f64;
    for i in (0..depth).rev() {
        path[i + 1].weight += one_fraction * path[i].weight * (i + 1) as f64 / denom;
        path[i].weight = zero_fraction * path[i].weight * (depth - i) as f64 / denom;
    }
}

fn unwind_path(path: &mut Vec<PathElement>, index: usize) {
    let depth = path.len() - 1;
    let PathElement { zero_fraction, one_fraction, .. } = path[index];
    let denom = (depth + 1) as f64;
    let mut next_one = path[depth].weight;

    for i in (0..depth).rev() {
        if one_fraction != 0.0 {
            let tmp = path[i].weight;
            path[i].weight = next_one * denom / ((i + 1) as f64 * one_fraction);
            next_one = tmp - path[i].weight * zero_fraction * (depth - i) as f64 / denom;
        } else {
            path[i].weight = path[i].weight * denom / (zero_fraction * (depth - i) as f64);
        }
    }

    for i in index..depth {
        path[i].feature = path[i + 1].feature;
        path[i].zero_fraction = path[i + 1].zero_fraction;
        path[i].one_fraction = path[i + 1].one_fraction;
    }
    path.pop();
}

/// Total permutation weight with element `index` removed, without mutating
fn unwound_path_sum(path: &[PathElement], index: usize) -> f64 {
    let depth = path.len() - 1;
    let PathElement { zero_fraction, one_fraction, .. } = path[index];
    let denom = (depth + 1) as f64;
    let mut next_one = path[depth].weight;
    let mut total = 0.0;

    for i in (0..depth).rev() {
        if one_fraction != 0.0 {
            let tmp = next_one * denom / ((i + 1) as f64 * one_fraction);
            total += tmp;
            next_one = path[i].weight - tmp * zero_fraction * ((depth - i) as f64 / denom);
        } else if zero_fraction != 0.0 {
            total += (path[i].weight / zero_fraction) / ((depth - i) as f64 / denom);
        }
    }

    total
}
