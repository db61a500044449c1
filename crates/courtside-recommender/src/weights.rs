//! Per-drill relevance weights.
//!
//! A drill lists the stats it improves in priority order (`good_for`). Each
//! position receives a fixed weight, tiered by how many stats the drill lists:
//!
//! | stats | weights |
//! |-------|---------|
//! | 1 | `[1.0]` |
//! | 2 | `[0.7, 0.3]` |
//! | 3 | `[0.5, 0.3, 0.2]` |
//! | other | prefix of [`BASE_WEIGHTS`], L1-normalized |
//!
//! Positions past the end of [`BASE_WEIGHTS`] get weight `0`.
//!
//! The weights feed [`score_drill_against_attention`], which the forest
//! predictor multiplies by vote counts to rank candidate drills.

use courtside_core::{Drill, StatKey, StatMap};

/// Base sequence for drills that list more than three stats.
pub const BASE_WEIGHTS: [f64; 5] = [1.0, 0.7, 0.3, 0.2, 0.1];

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use courtside_recommender::weights;
///
/// let weights = weights::from_fn(|i| 1.0 / (i as f64 + 1.0), 3);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Normalizes a weight vector to sum to 1.0 (L1 normalization).
///
/// If the sum is zero or negative, weights are left unchanged.
pub fn normalize_l1(weights: &mut [f64]) {
    let sum: f64 = weights.iter().copied().sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}

/// Weights for `n` stats taken from the head of [`BASE_WEIGHTS`], summing to 1.
///
/// ```
/// use courtside_recommender::weights;
///
/// let w = weights::generate_weights(4);
/// assert_eq!(w.len(), 4);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!((w[0] - 1.0 / 2.2).abs() < 1e-12);
/// ```
#[must_use]
pub fn generate_weights(n: usize) -> Vec<f64> {
    let mut weights = from_fn(|i| BASE_WEIGHTS[i], n.min(BASE_WEIGHTS.len()));
    normalize_l1(&mut weights);
    weights
}

/// Positional weights for a `good_for` list of `len` stats.
#[must_use]
pub fn tier_weights(len: usize) -> Vec<f64> {
    match len {
        1 => vec![1.0],
        2 => vec![0.7, 0.3],
        3 => vec![0.5, 0.3, 0.2],
        _ => generate_weights(len),
    }
}

/// Maps each of the drill's `good_for` stats to its positional weight.
///
/// If a stat is listed twice, the later position wins.
#[must_use]
pub fn drill_weights(drill: &Drill) -> StatMap {
    let weights = tier_weights(drill.good_for.len());
    drill
        .good_for
        .iter()
        .enumerate()
        .map(|(i, stat)| (*stat, weights.get(i).copied().unwrap_or(0.0)))
        .collect()
}

/// Weighted sum of absolute attention over the drill's `good_for` stats.
///
/// ```
/// use courtside_core::{Drill, StatKey, StatMap};
/// use courtside_recommender::weights::score_drill_against_attention;
///
/// let drill = Drill::new(1, [StatKey::FgPct, StatKey::Points]);
/// let attention = StatMap::from([(StatKey::FgPct, 0.8), (StatKey::Points, 0.6)]);
/// let relevance = score_drill_against_attention(&drill, &attention);
/// assert!((relevance - 0.74).abs() < 1e-12);
/// ```
#[must_use]
pub fn score_drill_against_attention(drill: &Drill, attention: &StatMap) -> f64 {
    let weights = drill_weights(drill);
    drill
        .good_for
        .iter()
        .map(|stat| weights.get_or_zero(*stat) * attention.get_or_zero(*stat).abs())
        .sum()
}

/// Plain sum of attention over the drill's `good_for` stats.
///
/// Reported alongside the relevance score; it does not affect ranking.
#[must_use]
pub fn coverage_score(good_for: &[StatKey], attention: &StatMap) -> f64 {
    good_for.iter().map(|stat| attention.get_or_zero(*stat)).sum()
}
