//! Multi-label decision trees over attention features.
//!
//! Each internal node compares one stat against a threshold (`value <= threshold`
//! goes left), and each leaf stores a ranked list of drill ids: the labels of the
//! training samples that reached it, ordered by how often they occurred.
//!
//! Splits are chosen by weighted Gini impurity over label memberships. Every
//! distinct value of a feature in the current partition is a candidate threshold,
//! tried in order of first occurrence; the first split with the strictly lowest
//! impurity wins.

use std::{borrow::Borrow, collections::BTreeMap};

use courtside_core::{DrillId, StatKey, StatMap, TrainingSample};
use serde::{Deserialize, Serialize};

/// Default depth limit for grown trees.
pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Drill ids ranked by descending label frequency, ties by ascending id.
        prediction: Vec<DrillId>,
    },
    Split {
        feature: StatKey,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Descends to a leaf and returns its ranked prediction.
    ///
    /// Features missing from `input` read as `0.0`.
    #[must_use]
    pub fn predict(&self, input: &StatMap) -> &[DrillId] {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { prediction } => return prediction,
                Self::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = input.get_or_zero(*feature);
                    let value = if value.is_nan() { 0.0 } else { value };
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Free-function form of [`TreeNode::predict`].
#[must_use]
pub fn predict_tree<'a>(tree: &'a TreeNode, input: &StatMap) -> &'a [DrillId] {
    tree.predict(input)
}

/// The best split found for a partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    pub feature: StatKey,
    pub threshold: f64,
    /// Size-weighted Gini impurity of the two halves.
    pub impurity: f64,
}

/// Label frequencies over a set of samples, keyed by drill id.
fn label_counts<S: Borrow<TrainingSample>>(samples: &[S]) -> BTreeMap<DrillId, usize> {
    let mut counts = BTreeMap::new();
    for sample in samples {
        for label in &sample.borrow().labels {
            *counts.entry(*label).or_insert(0) += 1;
        }
    }
    counts
}

/// Drill ids ranked by descending frequency; equal counts keep ascending id order.
#[must_use]
pub fn rank_labels<S: Borrow<TrainingSample>>(samples: &[S]) -> Vec<DrillId> {
    let mut counts = label_counts(samples).into_iter().collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(id, _)| id).collect()
}

/// Gini impurity of the label distribution.
///
/// Probabilities are taken over label memberships, so the result stays in
/// `[0, 1]` for multi-label samples. An empty partition has impurity `0`.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn gini<S: Borrow<TrainingSample>>(samples: &[S]) -> f64 {
    let counts = label_counts(samples);
    let total = counts.values().sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn partition<'a, S: Borrow<TrainingSample>>(
    samples: &'a [S],
    feature: StatKey,
    threshold: f64,
) -> (Vec<&'a TrainingSample>, Vec<&'a TrainingSample>) {
    let mut left = vec![];
    let mut right = vec![];
    for sample in samples {
        let sample = sample.borrow();
        let value = sample.feature(feature);
        if value <= threshold {
            left.push(sample);
        } else if value > threshold {
            right.push(sample);
        }
    }
    (left, right)
}

/// Distinct values of `feature` in order of first occurrence.
fn candidate_thresholds<S: Borrow<TrainingSample>>(samples: &[S], feature: StatKey) -> Vec<f64> {
    let mut thresholds: Vec<f64> = vec![];
    for sample in samples {
        let value = sample.borrow().feature(feature);
        if !thresholds.contains(&value) {
            thresholds.push(value);
        }
    }
    thresholds
}

/// Searches every (feature, threshold) pair for the lowest weighted impurity.
///
/// Returns `None` only when there is nothing to split on (no features or no
/// samples).
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn find_best_split<S: Borrow<TrainingSample>>(
    samples: &[S],
    features: &[StatKey],
) -> Option<SplitCandidate> {
    let n = samples.len() as f64;
    let mut best: Option<SplitCandidate> = None;
    for &feature in features {
        for threshold in candidate_thresholds(samples, feature) {
            let (left, right) = partition(samples, feature, threshold);
            let impurity = (left.len() as f64 / n) * gini(&left)
                + (right.len() as f64 / n) * gini(&right);
            if best.is_none_or(|b| impurity < b.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
    }
    best
}

/// Grows a tree from `depth` down to `max_depth`.
///
/// A partition becomes a leaf once the depth limit is reached or it holds at
/// most one sample. If no split can be found, the partition is also turned into
/// a leaf.
#[must_use]
pub fn build_tree<S: Borrow<TrainingSample>>(
    samples: &[S],
    features: &[StatKey],
    depth: usize,
    max_depth: usize,
) -> TreeNode {
    if depth >= max_depth || samples.len() <= 1 {
        return TreeNode::Leaf {
            prediction: rank_labels(samples),
        };
    }

    let Some(split) = find_best_split(samples, features) else {
        return build_tree(samples, features, max_depth, max_depth);
    };

    let (left, right) = partition(samples, split.feature, split.threshold);
    tracing::trace!(
        depth,
        feature = %split.feature,
        threshold = split.threshold,
        impurity = split.impurity,
        left = left.len(),
        right = right.len(),
        "split node"
    );

    TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(build_tree(&left, features, depth + 1, max_depth)),
        right: Box::new(build_tree(&right, features, depth + 1, max_depth)),
    }
}

impl TreeParams {
    /// Grows a full tree from the root.
    #[must_use]
    pub fn build<S: Borrow<TrainingSample>>(
        &self,
        samples: &[S],
        features: &[StatKey],
    ) -> TreeNode {
        build_tree(samples, features, 0, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use courtside_core::Drill;

    use super::*;
    use crate::synthetic::generate_synthetic_samples;

    fn sample(features: &[(StatKey, f64)], labels: &[DrillId]) -> TrainingSample {
        TrainingSample::new(
            features.iter().copied().collect::<StatMap>(),
            labels.to_vec(),
        )
    }

    fn separable() -> Vec<TrainingSample> {
        vec![
            sample(&[(StatKey::FgPct, 0.9)], &[1]),
            sample(&[(StatKey::FgPct, 0.8)], &[1]),
            sample(&[(StatKey::Turnovers, 0.9)], &[2]),
            sample(&[(StatKey::Turnovers, 0.7)], &[2]),
        ]
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini::<TrainingSample>(&[]), 0.0);

        let pure = [sample(&[], &[1]), sample(&[], &[1])];
        assert_eq!(gini(&pure), 0.0);

        let mixed = [sample(&[], &[1]), sample(&[], &[2])];
        assert!((gini(&mixed) - 0.5).abs() < 1e-12);

        let multi = [sample(&[], &[1, 2, 3, 4]), sample(&[], &[5, 6, 7, 8])];
        let g = gini(&multi);
        assert!((0.0..=1.0).contains(&g));
        assert!((g - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_rank_labels_breaks_ties_by_id() {
        let samples = [sample(&[], &[5, 2]), sample(&[], &[2, 9]), sample(&[], &[7])];
        assert_eq!(rank_labels(&samples), [2, 5, 7, 9]);
    }

    #[test]
    fn test_find_best_split_separates_labels() {
        let samples = separable();
        let features = [StatKey::FgPct, StatKey::Turnovers];
        let split = find_best_split(&samples, &features).unwrap();
        assert_eq!(split.impurity, 0.0);
        assert_eq!(split.feature, StatKey::FgPct);
        assert_eq!(split.threshold, 0.0);
    }

    #[test]
    fn test_find_best_split_without_features() {
        assert!(find_best_split(&separable(), &[]).is_none());
    }

    #[test]
    fn test_build_tree_predicts_training_labels() {
        let samples = separable();
        let features = [StatKey::FgPct, StatKey::Turnovers];
        let tree = TreeParams::default().build(&samples, &features);
        assert!(tree.is_split());

        for s in &samples {
            assert_eq!(tree.predict(&s.features), s.labels.as_slice());
        }
    }

    #[test]
    fn test_single_sample_is_leaf() {
        let samples = [sample(&[(StatKey::Points, 0.5)], &[3, 4])];
        let tree = build_tree(&samples, &[StatKey::Points], 0, 5);
        assert_eq!(
            tree,
            TreeNode::Leaf {
                prediction: vec![3, 4]
            }
        );
    }

    #[test]
    fn test_empty_samples_produce_empty_leaf() {
        let tree = build_tree::<TrainingSample>(&[], &[StatKey::Points], 0, 5);
        assert_eq!(tree.predict(&StatMap::new()), &[] as &[DrillId]);
    }

    #[test]
    fn test_depth_limit() {
        let samples = (0..32u32)
            .map(|i| sample(&[(StatKey::Points, f64::from(i) / 32.0)], &[i]))
            .collect::<Vec<_>>();
        for max_depth in 0..4 {
            let tree = build_tree(&samples, &[StatKey::Points], 0, max_depth);
            assert!(tree.depth() <= max_depth);
        }
        let root_leaf = build_tree(&samples, &[StatKey::Points], 0, 0);
        assert!(root_leaf.is_leaf());
        assert_eq!(root_leaf.leaf_count(), 1);
    }

    #[test]
    fn test_no_features_yields_leaf() {
        let tree = build_tree(&separable(), &[], 0, 5);
        assert_eq!(
            tree,
            TreeNode::Leaf {
                prediction: vec![1, 2]
            }
        );
    }

    /// Walks `node` alongside the samples that reach it.
    fn assert_node_invariants(node: &TreeNode, reached: &[&TrainingSample]) {
        match node {
            TreeNode::Leaf { prediction } => {
                for id in prediction {
                    assert!(
                        reached.iter().any(|s| s.labels.contains(id)),
                        "leaf predicts {id}, which no reaching sample carries"
                    );
                }
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                assert!(
                    reached.iter().any(|s| s.feature(*feature) == *threshold),
                    "threshold {threshold} on {feature} was not observed at this node"
                );
                let (l, r): (Vec<_>, Vec<_>) = reached
                    .iter()
                    .copied()
                    .partition(|s| s.feature(*feature) <= *threshold);
                assert_node_invariants(left, &l);
                assert_node_invariants(right, &r);
            }
        }
    }

    #[test]
    fn test_grown_trees_keep_leaf_and_threshold_invariants() {
        use rand::SeedableRng as _;

        let drills = [
            Drill::new(1, [StatKey::FgPct, StatKey::Points]),
            Drill::new(2, [StatKey::Turnovers, StatKey::Assists]),
            Drill::new(3, [StatKey::ThreePtsPct]),
            Drill::new(4, [StatKey::Steals, StatKey::Blocks, StatKey::Rebounds]),
            Drill::new(5, [StatKey::FtPct, StatKey::Points]),
        ];
        for seed in 0..10 {
            let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(seed);
            let samples =
                generate_synthetic_samples(&drills, &StatKey::ALL, 40, &mut rng).samples;
            for max_depth in [1, 3, DEFAULT_MAX_DEPTH] {
                let tree = build_tree(&samples, &StatKey::ALL, 0, max_depth);
                let reached = samples.iter().collect::<Vec<_>>();
                assert_node_invariants(&tree, &reached);
            }
        }
    }

    #[test]
    fn test_predict_missing_feature_reads_zero() {
        let tree = TreeNode::Split {
            feature: StatKey::Assists,
            threshold: 0.3,
            left: Box::new(TreeNode::Leaf {
                prediction: vec![10],
            }),
            right: Box::new(TreeNode::Leaf {
                prediction: vec![20],
            }),
        };
        assert_eq!(predict_tree(&tree, &StatMap::new()), &[10]);
        assert_eq!(tree.predict(&StatMap::from([(StatKey::Assists, 0.3)])), &[10]);
        assert_eq!(tree.predict(&StatMap::from([(StatKey::Assists, 0.31)])), &[20]);
    }

    #[test]
    fn test_tree_serde_shape() {
        let tree = TreeNode::Split {
            feature: StatKey::Turnovers,
            threshold: 0.5,
            left: Box::new(TreeNode::Leaf {
                prediction: vec![1],
            }),
            right: Box::new(TreeNode::Leaf { prediction: vec![] }),
        };
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["kind"], "split");
        assert_eq!(json["feature"], "turnovers");
        assert_eq!(json["left"]["prediction"][0], 1);
        let back: TreeNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
