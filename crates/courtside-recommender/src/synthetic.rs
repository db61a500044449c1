//! Synthetic training data.
//!
//! Each sample picks two or three random stats with random attention scores in
//! `[0.2, 1.0)` and labels itself with the drills whose `good_for` overlaps the
//! picked stats, most overlap first. Samples no drill matches are discarded.

use std::collections::BTreeMap;

use courtside_core::{Drill, StatKey, StatMap, TrainingSample};
use rand::{Rng, seq::SliceRandom as _};

pub const DEFAULT_SAMPLE_COUNT: usize = 50;

const SCORE_RANGE: std::ops::Range<f64> = 0.2..1.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticSamples {
    pub samples: Vec<TrainingSample>,
    /// How often each stat was picked, counting discarded samples too.
    pub stat_usage: BTreeMap<StatKey, usize>,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Generates up to `count` labeled samples over `stat_keys`.
pub fn generate_synthetic_samples<R>(
    drills: &[Drill],
    stat_keys: &[StatKey],
    count: usize,
    rng: &mut R,
) -> SyntheticSamples
where
    R: Rng + ?Sized,
{
    let mut keys = stat_keys.to_vec();
    let mut result = SyntheticSamples::default();

    for _ in 0..count {
        keys.shuffle(rng);
        let take = rng.random_range(2..=3).min(keys.len());

        let mut picked = keys[..take]
            .iter()
            .map(|&stat| (stat, round4(rng.random_range(SCORE_RANGE))))
            .collect::<Vec<_>>();
        picked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (stat, _) in &picked {
            *result.stat_usage.entry(*stat).or_insert(0) += 1;
        }

        let mut matches = drills
            .iter()
            .filter_map(|drill| {
                let overlap = picked
                    .iter()
                    .filter(|(stat, _)| drill.is_good_for(*stat))
                    .count();
                (overlap > 0).then_some((drill.id, overlap))
            })
            .collect::<Vec<_>>();
        if matches.is_empty() {
            continue;
        }
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        result.samples.push(TrainingSample::new(
            picked.into_iter().collect::<StatMap>(),
            matches.into_iter().map(|(id, _)| id).collect::<Vec<_>>(),
        ));
    }

    tracing::debug!(
        requested = count,
        generated = result.samples.len(),
        usage = ?result.stat_usage,
        "generated synthetic samples"
    );
    result
}
