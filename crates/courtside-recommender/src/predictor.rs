//! Turning forest votes into a drill recommendation list.
//!
//! Every tree votes for each drill id in the leaf the input reaches. The
//! weighted predictor multiplies those votes by each drill's relevance to the
//! athlete's attention profile and then picks drills greedily, preferring
//! drills that cover attention areas not yet addressed.

use std::{cmp::Ordering, collections::BTreeMap};

use courtside_core::{DrillCatalog, DrillId, StatKey, StatMap};
use serde::Serialize;

use crate::{
    tree::TreeNode,
    weights::{coverage_score, score_drill_against_attention},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictorParams {
    /// Upper bound on the number of drills returned.
    pub max_recommendations: usize,
    /// Summed attention over uncovered stats that admits a candidate.
    pub urgency_threshold: f64,
    /// Drills admitted unconditionally before diversity is enforced.
    pub min_selected_before_diversity: usize,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            max_recommendations: 6,
            urgency_threshold: 0.5,
            min_selected_before_diversity: 3,
        }
    }
}

/// A drill that received votes and has non-zero relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: DrillId,
    pub votes: usize,
    pub relevance: f64,
    /// `votes * relevance`; candidates are ranked by this.
    pub score: f64,
    pub coverage_score: f64,
    pub good_for: Vec<StatKey>,
}

/// Per-drill vote counts from every tree. Keys iterate in ascending id order.
#[must_use]
pub fn tally_votes(forest: &[TreeNode], input: &StatMap) -> BTreeMap<DrillId, usize> {
    let mut votes = BTreeMap::new();
    for tree in forest {
        for id in tree.predict(input) {
            *votes.entry(*id).or_insert(0) += 1;
        }
    }
    votes
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Plain majority-vote ranking: ids by descending vote count, ties by ascending id.
#[must_use]
pub fn predict_forest(forest: &[TreeNode], input: &StatMap) -> Vec<DrillId> {
    let mut votes = tally_votes(forest, input).into_iter().collect::<Vec<_>>();
    votes.sort_by(|a, b| b.1.cmp(&a.1));
    votes.into_iter().map(|(id, _)| id).collect()
}

/// Scores every voted drill against the attention profile.
///
/// Drills absent from the catalog or with zero score are dropped. The result is
/// sorted by descending score; equal scores keep ascending id order.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn score_candidates<C>(forest: &[TreeNode], attention: &StatMap, drills: &C) -> Vec<Candidate>
where
    C: DrillCatalog + ?Sized,
{
    let mut candidates = tally_votes(forest, attention)
        .into_iter()
        .filter_map(|(id, votes)| {
            let drill = drills.drill(id)?;
            let relevance = score_drill_against_attention(drill, attention);
            let score = votes as f64 * relevance;
            (score > 0.0).then(|| Candidate {
                id,
                votes,
                relevance,
                score,
                coverage_score: coverage_score(&drill.good_for, attention),
                good_for: drill.good_for.clone(),
            })
        })
        .collect::<Vec<_>>();
    candidates.sort_by(|a, b| desc(a.score, b.score));
    candidates
}

/// Greedy pick from ranked candidates that favors uncovered attention areas.
///
/// A candidate's new stats are the `good_for` stats no selected drill covers
/// yet; its urgency is the summed attention over them. It is admitted if it
/// brings a new stat, its urgency exceeds `urgency_threshold`, or fewer than
/// `min_selected_before_diversity` drills have been selected.
#[must_use]
pub fn select_diverse(
    candidates: &[Candidate],
    attention: &StatMap,
    params: &PredictorParams,
) -> Vec<DrillId> {
    let mut selected = vec![];
    let mut covered: Vec<StatKey> = vec![];
    for candidate in candidates {
        if selected.len() >= params.max_recommendations {
            break;
        }
        let new_stats = candidate
            .good_for
            .iter()
            .copied()
            .filter(|stat| !covered.contains(stat))
            .collect::<Vec<_>>();
        let urgency = new_stats
            .iter()
            .map(|stat| attention.get_or_zero(*stat))
            .sum::<f64>();
        if !new_stats.is_empty()
            || urgency > params.urgency_threshold
            || selected.len() < params.min_selected_before_diversity
        {
            selected.push(candidate.id);
            for stat in new_stats {
                if !covered.contains(&stat) {
                    covered.push(stat);
                }
            }
        }
    }
    selected
}

/// Recommends up to six drills for an attention profile using default parameters.
///
/// ```
/// use courtside_core::{Drill, StatKey, StatMap};
/// use courtside_recommender::{predictor::predict_forest_weighted, tree::TreeNode};
///
/// let forest = vec![TreeNode::Leaf { prediction: vec![1, 2] }; 3];
/// let drills = vec![
///     Drill::new(1, [StatKey::Points]),
///     Drill::new(2, [StatKey::Turnovers]),
/// ];
/// let attention = StatMap::from([(StatKey::Turnovers, 1.2), (StatKey::Points, 0.6)]);
/// assert_eq!(predict_forest_weighted(&forest, &attention, &drills), [2, 1]);
/// ```
#[must_use]
pub fn predict_forest_weighted<C>(forest: &[TreeNode], attention: &StatMap, drills: &C) -> Vec<DrillId>
where
    C: DrillCatalog + ?Sized,
{
    predict_forest_weighted_with(forest, attention, drills, &PredictorParams::default())
}

#[must_use]
pub fn predict_forest_weighted_with<C>(
    forest: &[TreeNode],
    attention: &StatMap,
    drills: &C,
    params: &PredictorParams,
) -> Vec<DrillId>
where
    C: DrillCatalog + ?Sized,
{
    let candidates = score_candidates(forest, attention, drills);
    let selected = select_diverse(&candidates, attention, params);
    tracing::debug!(
        candidates = candidates.len(),
        selected = selected.len(),
        "weighted forest prediction"
    );
    selected
}

#[cfg(test)]
mod tests {
    use courtside_core::Drill;

    use super::*;

    fn leaf(prediction: &[DrillId]) -> TreeNode {
        TreeNode::Leaf {
            prediction: prediction.to_vec(),
        }
    }

    fn candidate(id: DrillId, score: f64, good_for: &[StatKey]) -> Candidate {
        Candidate {
            id,
            votes: 1,
            relevance: score,
            score,
            coverage_score: 0.0,
            good_for: good_for.to_vec(),
        }
    }

    #[test]
    fn test_tally_votes() {
        let forest = [leaf(&[1, 2]), leaf(&[1]), leaf(&[1, 2])];
        let votes = tally_votes(&forest, &StatMap::new());
        assert_eq!(votes.into_iter().collect::<Vec<_>>(), [(1, 3), (2, 2)]);
    }

    #[test]
    fn test_predict_forest_vote_order() {
        let forest = [leaf(&[4, 2]), leaf(&[2, 9]), leaf(&[9, 4, 2])];
        assert_eq!(predict_forest(&forest, &StatMap::new()), [2, 4, 9]);
        assert!(predict_forest(&[], &StatMap::new()).is_empty());
    }

    #[test]
    fn test_single_leaf_recommends_relevant_drill() {
        let forest = [leaf(&[1])];
        let drills = vec![Drill::new(1, [StatKey::FgPct, StatKey::Points])];
        let attention = StatMap::from([(StatKey::FgPct, 0.8), (StatKey::Points, 0.6)]);

        let candidates = score_candidates(&forest, &attention, &drills);
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].relevance - 0.74).abs() < 1e-12);
        assert!((candidates[0].score - 0.74).abs() < 1e-12);
        assert_eq!(predict_forest_weighted(&forest, &attention, &drills), [1]);
    }

    #[test]
    fn test_votes_multiply_relevance() {
        let forest = [leaf(&[1, 2]), leaf(&[1]), leaf(&[1, 2])];
        let drills = vec![Drill::new(1, [StatKey::Points]), Drill::new(2, [StatKey::Points])];
        let attention = StatMap::from([(StatKey::Points, 1.0)]);
        let candidates = score_candidates(&forest, &attention, &drills);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, 1);
        assert_eq!(candidates[0].score, 3.0);
        assert_eq!(candidates[1].score, 2.0);
    }

    #[test]
    fn test_unknown_and_irrelevant_drills_are_dropped() {
        let forest = [leaf(&[1, 2, 3])];
        let drills = vec![Drill::new(1, [StatKey::Points]), Drill::new(2, [StatKey::Blocks])];
        let attention = StatMap::from([(StatKey::Points, 0.9)]);
        let ids = score_candidates(&forest, &attention, &drills)
            .into_iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn test_equal_scores_keep_id_order() {
        let forest = [leaf(&[7, 3, 5])];
        let drills = vec![
            Drill::new(3, [StatKey::Steals]),
            Drill::new(5, [StatKey::Steals]),
            Drill::new(7, [StatKey::Steals]),
        ];
        let attention = StatMap::from([(StatKey::Steals, 0.8)]);
        assert_eq!(
            predict_forest_weighted(&forest, &attention, &drills),
            [3, 5, 7]
        );
    }

    #[test]
    fn test_diversity_rejects_redundant_drills() {
        let attention = StatMap::from([(StatKey::Points, 1.0), (StatKey::Assists, 0.9)]);
        let candidates = [
            candidate(1, 5.0, &[StatKey::Points]),
            candidate(2, 4.0, &[StatKey::Points]),
            candidate(3, 3.0, &[StatKey::Points]),
            candidate(4, 2.0, &[StatKey::Points]),
            candidate(5, 1.5, &[StatKey::Assists]),
            candidate(6, 1.0, &[StatKey::Assists]),
        ];
        let selected = select_diverse(&candidates, &attention, &PredictorParams::default());
        assert_eq!(selected, [1, 2, 3, 5]);
    }

    #[test]
    fn test_min_selected_admits_redundant_drills() {
        let attention = StatMap::from([(StatKey::Points, 1.0), (StatKey::Blocks, 0.2)]);
        let candidates = [
            candidate(1, 4.0, &[StatKey::Points]),
            candidate(2, 3.0, &[StatKey::Points]),
            candidate(3, 2.0, &[StatKey::Points]),
            candidate(4, 1.5, &[StatKey::Points]),
            candidate(5, 1.0, &[StatKey::Blocks, StatKey::Points]),
        ];
        let selected = select_diverse(&candidates, &attention, &PredictorParams::default());
        assert_eq!(selected, [1, 2, 3, 5]);

        let strict = PredictorParams {
            min_selected_before_diversity: 0,
            ..PredictorParams::default()
        };
        assert_eq!(select_diverse(&candidates, &attention, &strict), [1, 5]);
    }

    #[test]
    fn test_selection_is_capped() {
        let attention = StatKey::ALL.iter().map(|&s| (s, 1.0)).collect::<StatMap>();
        let candidates = StatKey::ALL
            .iter()
            .zip(1..)
            .map(|(&stat, id)| candidate(id, 10.0 - f64::from(id), &[stat]))
            .collect::<Vec<_>>();
        let selected = select_diverse(&candidates, &attention, &PredictorParams::default());
        assert_eq!(selected, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_attention_yields_nothing() {
        let forest = [leaf(&[1])];
        let drills = vec![Drill::new(1, [StatKey::Points])];
        assert!(predict_forest_weighted(&forest, &StatMap::new(), &drills).is_empty());
    }
}
