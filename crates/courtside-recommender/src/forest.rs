//! Random forest of multi-label decision trees.
//!
//! Each tree is grown on a random subset of the training samples: the sample
//! order is reshuffled for every tree and the first `floor(n * fraction)`
//! samples are used. Subsets are drawn without replacement.

use chrono::{DateTime, Utc};
use courtside_core::{StatKey, TrainingSample};
use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::tree::{TreeNode, TreeParams};

pub const DEFAULT_NUM_TREES: usize = 10;
pub const DEFAULT_BOOTSTRAP_FRACTION: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub num_trees: usize,
    /// Share of the samples each tree is trained on.
    pub bootstrap_fraction: f64,
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            num_trees: DEFAULT_NUM_TREES,
            bootstrap_fraction: DEFAULT_BOOTSTRAP_FRACTION,
            tree: TreeParams::default(),
        }
    }
}

impl ForestParams {
    /// Number of samples each tree sees when training on `len` samples.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn subset_len(&self, len: usize) -> usize {
        ((len as f64 * self.bootstrap_fraction).floor() as usize).min(len)
    }
}

/// A trained forest, ready to be written to or read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    pub created_at: DateTime<Utc>,
    /// Features the trees were allowed to split on.
    pub features: Vec<StatKey>,
    pub params: ForestParams,
    pub trees: Vec<TreeNode>,
}

impl Forest {
    /// Wraps already-built trees.
    #[must_use]
    pub fn from_trees(trees: Vec<TreeNode>) -> Self {
        Self {
            created_at: Utc::now(),
            features: vec![],
            params: ForestParams {
                num_trees: trees.len(),
                ..ForestParams::default()
            },
            trees,
        }
    }

    #[must_use]
    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

/// Trains `params.num_trees` trees, each on a freshly shuffled subset.
///
/// The caller's slice is left untouched; shuffling happens on an index
/// permutation that carries over from one tree to the next.
pub fn build_forest<R>(
    samples: &[TrainingSample],
    features: &[StatKey],
    params: &ForestParams,
    rng: &mut R,
) -> Forest
where
    R: Rng + ?Sized,
{
    let subset_len = params.subset_len(samples.len());
    let mut order = (0..samples.len()).collect::<Vec<_>>();
    let mut trees = Vec::with_capacity(params.num_trees);

    for i in 0..params.num_trees {
        order.shuffle(rng);
        let subset = order[..subset_len]
            .iter()
            .map(|&idx| &samples[idx])
            .collect::<Vec<_>>();
        let tree = params.tree.build(&subset, features);
        tracing::debug!(
            tree = i,
            samples = subset.len(),
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "trained tree"
        );
        trees.push(tree);
    }

    Forest {
        created_at: Utc::now(),
        features: features.to_vec(),
        params: *params,
        trees,
    }
}

#[cfg(test)]
mod tests {
    use courtside_core::StatMap;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn samples() -> Vec<TrainingSample> {
        (0..20u32)
            .map(|i| {
                let stat = if i % 2 == 0 {
                    StatKey::FgPct
                } else {
                    StatKey::Turnovers
                };
                TrainingSample::new([(stat, 0.5 + f64::from(i) / 50.0)], [i % 2 + 1])
            })
            .collect()
    }

    #[test]
    fn test_subset_len() {
        let params = ForestParams::default();
        assert_eq!(params.subset_len(0), 0);
        assert_eq!(params.subset_len(1), 0);
        assert_eq!(params.subset_len(10), 7);
        assert_eq!(params.subset_len(50), 35);

        let all = ForestParams {
            bootstrap_fraction: 1.5,
            ..params
        };
        assert_eq!(all.subset_len(10), 10);
    }

    #[test]
    fn test_build_forest_tree_count() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let features = [StatKey::FgPct, StatKey::Turnovers];
        for num_trees in [0, 1, 10] {
            let params = ForestParams {
                num_trees,
                ..ForestParams::default()
            };
            let forest = build_forest(&samples(), &features, &params, &mut rng);
            assert_eq!(forest.len(), num_trees);
            assert_eq!(forest.features, features);
        }
    }

    #[test]
    fn test_build_forest_leaves_input_order() {
        let input = samples();
        let before = input.clone();
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let _ = build_forest(
            &input,
            &[StatKey::FgPct],
            &ForestParams::default(),
            &mut rng,
        );
        assert_eq!(input, before);
    }

    #[test]
    fn test_build_forest_is_reproducible_with_seed() {
        let features = [StatKey::FgPct, StatKey::Turnovers];
        let params = ForestParams::default();
        let a = build_forest(
            &samples(),
            &features,
            &params,
            &mut Pcg64Mcg::seed_from_u64(42),
        );
        let b = build_forest(
            &samples(),
            &features,
            &params,
            &mut Pcg64Mcg::seed_from_u64(42),
        );
        assert_eq!(a.trees, b.trees);
    }

    #[test]
    fn test_forest_separates_clean_classes() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let features = [StatKey::FgPct, StatKey::Turnovers];
        let forest = build_forest(&samples(), &features, &ForestParams::default(), &mut rng);
        let fg = StatMap::from([(StatKey::FgPct, 0.5)]);
        let to = StatMap::from([(StatKey::Turnovers, 0.9)]);
        for tree in forest.trees() {
            assert_eq!(tree.predict(&fg), &[1]);
            assert_eq!(tree.predict(&to), &[2]);
        }
    }

    #[test]
    fn test_empty_training_set() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let forest = build_forest(&[], &[StatKey::Points], &ForestParams::default(), &mut rng);
        assert_eq!(forest.len(), DEFAULT_NUM_TREES);
        assert!(forest.trees().iter().all(TreeNode::is_leaf));
    }

    #[test]
    fn test_forest_json_round_trip() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let forest = build_forest(
            &samples(),
            &[StatKey::FgPct],
            &ForestParams::default(),
            &mut rng,
        );
        let json = serde_json::to_string(&forest).unwrap();
        let back: Forest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.created_at, forest.created_at);
        assert_eq!(back.features, forest.features);
        assert_eq!(back.len(), forest.len());
        let input = StatMap::from([(StatKey::FgPct, 0.5)]);
        for (a, b) in back.trees().iter().zip(forest.trees()) {
            assert_eq!(a.predict(&input), b.predict(&input));
        }
    }
}
