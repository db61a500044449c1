//! Forest training options shared by every command that needs a forest.

use std::path::{Path, PathBuf};

use courtside_core::{Drill, StatKey, TrainingSample};
use courtside_recommender::{
    Forest, ForestParams, TreeParams, build_forest,
    forest::DEFAULT_NUM_TREES,
    generate_synthetic_samples,
    tree::DEFAULT_MAX_DEPTH,
};
use rand::Rng;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainingArg {
    /// Path to the training samples JSON file
    #[arg(long, default_value = "data/training_samples.json")]
    samples: PathBuf,
    /// Train on this many synthetic samples instead of the samples file
    #[arg(long)]
    synthetic: Option<usize>,
    /// Number of trees in the forest
    #[arg(long, default_value_t = DEFAULT_NUM_TREES)]
    num_trees: usize,
    /// Maximum depth of each tree
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Seed for reproducible sampling and training
    #[arg(long)]
    seed: Option<u64>,
}

impl TrainingArg {
    fn params(&self) -> ForestParams {
        ForestParams {
            num_trees: self.num_trees,
            tree: TreeParams {
                max_depth: self.max_depth,
            },
            ..ForestParams::default()
        }
    }

    fn training_samples<R>(&self, drills: &[Drill], rng: &mut R) -> anyhow::Result<Vec<TrainingSample>>
    where
        R: Rng + ?Sized,
    {
        match self.synthetic {
            Some(count) => {
                eprintln!("Generating {count} synthetic training samples...");
                let generated = generate_synthetic_samples(drills, &StatKey::ALL, count, rng);
                eprintln!("Generated {} samples", generated.samples.len());
                Ok(generated.samples)
            }
            None => {
                let samples = util::read_training_samples_file(&self.samples)?;
                eprintln!(
                    "Loaded {} training samples from {}",
                    samples.len(),
                    self.samples.display()
                );
                Ok(samples)
            }
        }
    }

    /// Trains a forest over every stat.
    pub(crate) fn build_forest(&self, drills: &[Drill]) -> anyhow::Result<Forest> {
        let mut rng = util::make_rng(self.seed);
        let samples = self.training_samples(drills, &mut rng)?;
        let params = self.params();
        eprintln!(
            "Training {} trees (max depth {})...",
            params.num_trees, params.tree.max_depth
        );
        let forest = build_forest(&samples, &StatKey::ALL, &params, &mut rng);
        eprintln!("Forest trained");
        Ok(forest)
    }

    /// Loads `forest` if given, otherwise trains a new forest.
    pub(crate) fn load_or_build(
        &self,
        forest: Option<&Path>,
        drills: &[Drill],
    ) -> anyhow::Result<Forest> {
        match forest {
            Some(path) => {
                let forest = util::read_forest_file(path)?;
                eprintln!(
                    "Loaded forest of {} trees built at {}",
                    forest.len(),
                    forest.created_at
                );
                Ok(forest)
            }
            None => self.build_forest(drills),
        }
    }
}
