//! Drill recommendation with a multi-label random forest.
//!
//! The recommender maps an athlete's attention profile (stat -> how urgently it
//! needs work) to an ordered list of drill ids.
//!
//! # How Recommendation Works
//!
//! 1. **Training data** - Labeled samples pair an attention profile with the
//!    drills that suit it. They come from a data file or from
//!    [`synthetic::generate_synthetic_samples`].
//! 2. **Forest** - [`forest::build_forest`] trains several
//!    [`tree::TreeNode`]s, each on a random 70% of the samples.
//! 3. **Voting** - Every tree routes the profile to a leaf and votes for the
//!    drills stored there.
//! 4. **Relevance** - Votes are multiplied by how well each drill's `good_for`
//!    stats match the profile ([`weights`]).
//! 5. **Diversity** - [`predictor::select_diverse`] picks drills greedily,
//!    preferring ones that cover stats not yet addressed.
//!
//! ```text
//! TrainingSample[] ──build_forest──► Forest
//!                                      │
//! attention map ──────────────────────►├─ tally_votes
//! drill catalog ──────────────────────►├─ score_candidates (votes x relevance)
//!                                      └─ select_diverse ──► Vec<DrillId>
//! ```
//!
//! [`regimen`] builds on top of this to turn a coach's regimen into per-athlete
//! drill lists.
//!
//! # Example
//!
//! ```
//! use courtside_core::{Drill, StatKey, StatMap, TrainingSample};
//! use courtside_recommender::{
//!     forest::{ForestParams, build_forest},
//!     predictor::predict_forest_weighted,
//! };
//! use rand::SeedableRng as _;
//!
//! let drills = vec![
//!     Drill::new(1, [StatKey::FgPct, StatKey::Points]),
//!     Drill::new(2, [StatKey::Turnovers]),
//! ];
//! let samples = vec![
//!     TrainingSample::new([(StatKey::FgPct, 0.9)], [1]),
//!     TrainingSample::new([(StatKey::Points, 0.8)], [1]),
//!     TrainingSample::new([(StatKey::Turnovers, 0.9)], [2]),
//!     TrainingSample::new([(StatKey::Turnovers, 0.6)], [2]),
//! ];
//! let features = [StatKey::FgPct, StatKey::Points, StatKey::Turnovers];
//!
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
//! let forest = build_forest(&samples, &features, &ForestParams::default(), &mut rng);
//!
//! let attention = StatMap::from([(StatKey::FgPct, 0.8), (StatKey::Points, 0.6)]);
//! let recommended = predict_forest_weighted(forest.trees(), &attention, &drills);
//! assert!(recommended.len() <= 6);
//! assert!(!recommended.contains(&2));
//! ```

pub use self::{
    forest::{Forest, ForestParams, build_forest},
    predictor::{PredictorParams, predict_forest, predict_forest_weighted},
    regimen::{AthleteRegimen, Regimen, RegimenPlanner},
    synthetic::generate_synthetic_samples,
    tree::{TreeNode, TreeParams, build_tree},
};

pub mod forest;
pub mod predictor;
pub mod regimen;
pub mod synthetic;
pub mod tree;
pub mod weights;

#[cfg(test)]
mod tests {
    use courtside_core::{Drill, StatKey};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn catalog() -> Vec<Drill> {
        vec![
            Drill::new(1, [StatKey::FgPct, StatKey::Points]),
            Drill::new(2, [StatKey::Turnovers, StatKey::Assists]),
            Drill::new(3, [StatKey::ThreePtsPct]),
            Drill::new(4, [StatKey::Steals, StatKey::Blocks, StatKey::Rebounds]),
            Drill::new(5, [StatKey::FtPct, StatKey::Points]),
            Drill::new(6, [StatKey::TwoPtsPct, StatKey::FgPct]),
        ]
    }

    #[test]
    fn test_training_samples_recover_their_labels() {
        let drills = catalog();
        let mut hits = 0;
        let mut total = 0;
        for seed in 0..40 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let samples =
                generate_synthetic_samples(&drills, &StatKey::ALL, 40, &mut rng).samples;
            let forest = build_forest(&samples, &StatKey::ALL, &ForestParams::default(), &mut rng);
            for sample in &samples {
                total += 1;
                let votes = predictor::tally_votes(forest.trees(), &sample.features);
                if sample.labels.iter().any(|id| votes.contains_key(id)) {
                    hits += 1;
                }
            }
        }
        assert!(total > 0);
        assert!(hits * 100 >= total * 95, "recovered {hits} of {total}");
    }

    #[test]
    fn test_recommendations_are_bounded_and_relevant() {
        let drills = catalog();
        for seed in 0..20 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let samples =
                generate_synthetic_samples(&drills, &StatKey::ALL, 50, &mut rng).samples;
            let forest = build_forest(&samples, &StatKey::ALL, &ForestParams::default(), &mut rng);
            for sample in &samples {
                let candidates =
                    predictor::score_candidates(forest.trees(), &sample.features, &drills);
                let recommended = predict_forest_weighted(forest.trees(), &sample.features, &drills);
                assert!(recommended.len() <= 6);
                for id in &recommended {
                    let candidate = candidates.iter().find(|c| c.id == *id).unwrap();
                    assert!(candidate.score > 0.0);
                }
            }
        }
    }
}
