//! Attention and excellence scoring against a league baseline.
//!
//! An athlete's recent per-game averages are standardized against every
//! athlete's records in the same window of games:
//!
//! ```text
//! z         = (athlete_avg - league_mean) / league_sample_sd
//! attention = z * -impact
//! ```
//!
//! `impact` is `+1` when higher is better and `-1` when higher is worse.
//! Negative scores become attention areas and positive scores excellence
//! areas. With the negated impact, an athlete above the league mean in a
//! higher-is-better stat (points, assists) scores negative, while an athlete
//! above the mean in turnovers scores positive.
//!
//! # Zero-variance fallback
//!
//! When every record in the window has the same value for a stat, the standard
//! deviation is zero and `z` is replaced by a fixed magnitude:
//!
//! - `-2` if higher is better and the athlete is below the league mean
//! - `+2` if higher is worse and the athlete is above the league mean
//! - `0` otherwise
//!
//! Downstream rankings compare these scores against ordinary z-scores, so the
//! magnitude is part of the observable behavior.

use std::cmp::Ordering;

use courtside_core::{AthleteId, DerivedStats, GameId, GameRecordProvider, StatKey, StatMap};
use courtside_stats::descriptive::{self, DescriptiveStats};
use serde::Serialize;

/// Number of most recent games analyzed by default.
pub const CHART_GAMES_LIMIT: u32 = 5;

/// Maximum number of entries in each of the attention and excellence lists.
pub const MAX_AREAS: usize = 3;

/// Magnitude of the z-score used when a stat has no variance.
pub const ZERO_VARIANCE_Z: f64 = 2.0;

/// One scored statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatScore {
    pub stat: StatKey,
    pub label: &'static str,
    pub score: f64,
}

impl StatScore {
    fn new(stat: StatKey, score: f64) -> Self {
        Self {
            stat,
            label: stat.label(),
            score,
        }
    }
}

/// Result of [`analyze_player_performance`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    /// Up to three negative scores, most negative first.
    pub attention_areas: Vec<StatScore>,
    /// Up to three positive scores, most positive first.
    pub excellence_areas: Vec<StatScore>,
    /// Every stat's score, ascending.
    pub all_scores: Vec<StatScore>,
}

impl PerformanceAnalysis {
    /// Builds the predictor input from the attention areas.
    ///
    /// Each attention stat maps to the absolute value of its score; stats that do not
    /// need attention are left out (and therefore read as `0`).
    #[must_use]
    pub fn attention_map(&self) -> StatMap {
        self.attention_areas
            .iter()
            .map(|area| (area.stat, area.score.abs()))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_scores.is_empty()
    }
}

/// Mean and sample standard deviation of one stat over a window of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBaseline {
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-stat league baseline, indexed in [`StatKey::ALL`] order.
#[derive(Debug, Clone)]
pub struct LeagueBaseline {
    stats: Vec<DescriptiveStats>,
}

impl LeagueBaseline {
    /// Computes the baseline from derived stats.
    ///
    /// Returns `None` when `records` is empty.
    #[must_use]
    pub fn from_derived(records: &[DerivedStats]) -> Option<Self> {
        let mut stats = Vec::with_capacity(StatKey::LEN);
        for key in StatKey::ALL {
            stats.push(DescriptiveStats::new(records.iter().map(|r| r.get(key)))?);
        }
        Some(Self { stats })
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> StatBaseline {
        let stats = &self.stats[key as usize];
        StatBaseline {
            mean: stats.mean,
            std_dev: stats.std_dev,
        }
    }
}

/// Returns the ids of the `games_limit` most recent games ending at
/// `max_game_id`, skipping ids that are not positive.
#[must_use]
pub fn recent_game_window(max_game_id: GameId, games_limit: u32) -> Vec<GameId> {
    (0..games_limit)
        .map_while(|i| max_game_id.checked_sub(i))
        .filter(|id| *id > 0)
        .collect()
}

/// Standardizes `athlete_avg` against `baseline`, applying the zero-variance
/// fallback.
#[must_use]
pub fn z_score(key: StatKey, athlete_avg: f64, baseline: StatBaseline) -> f64 {
    let StatBaseline { mean, std_dev } = baseline;
    if std_dev > 0.0 {
        return (athlete_avg - mean) / std_dev;
    }
    if key.impact().is_positive() && athlete_avg < mean {
        -ZERO_VARIANCE_Z
    } else if key.impact().is_negative() && athlete_avg > mean {
        ZERO_VARIANCE_Z
    } else {
        0.0
    }
}

/// Turns a z-score into an attention score (`z * -impact`).
#[must_use]
pub fn attention_score(key: StatKey, z: f64) -> f64 {
    z * -key.impact().sign()
}

fn by_score(a: &StatScore, b: &StatScore) -> Ordering {
    a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
}

/// Scores every stat for `athlete_id` over the last `games_limit` games.
///
/// The baseline uses every athlete's records in the window, not only the
/// target athlete's. An empty record set, a window without records, or an
/// athlete without records in the window all yield an empty analysis.
///
/// # Examples
///
/// ```
/// use courtside_analysis::attention::analyze_player_performance;
/// use courtside_core::GameRecord;
///
/// let records: Vec<GameRecord> = vec![];
/// let analysis = analyze_player_performance(1, &records, 5);
/// assert!(analysis.attention_areas.is_empty());
/// assert!(analysis.excellence_areas.is_empty());
/// ```
pub fn analyze_player_performance<P>(
    athlete_id: AthleteId,
    records: &P,
    games_limit: u32,
) -> PerformanceAnalysis
where
    P: GameRecordProvider + ?Sized,
{
    let records = records.game_records();
    let Some(max_game_id) = records.iter().map(|r| r.game_id).max() else {
        return PerformanceAnalysis::default();
    };
    let window = recent_game_window(max_game_id, games_limit);
    let in_window = records
        .iter()
        .filter(|r| window.contains(&r.game_id))
        .collect::<Vec<_>>();
    tracing::debug!(
        athlete_id,
        max_game_id,
        games = window.len(),
        records = in_window.len(),
        "analyzing recent games"
    );

    let derived = in_window.iter().map(|r| r.derive()).collect::<Vec<_>>();
    let Some(baseline) = LeagueBaseline::from_derived(&derived) else {
        return PerformanceAnalysis::default();
    };

    let athlete_derived = in_window
        .iter()
        .zip(&derived)
        .filter(|(r, _)| r.player_id == athlete_id)
        .map(|(_, d)| *d)
        .collect::<Vec<_>>();
    if athlete_derived.is_empty() {
        tracing::debug!(athlete_id, "no records for athlete in window");
        return PerformanceAnalysis::default();
    }

    let scores = StatKey::ALL
        .into_iter()
        .map(|key| {
            let values = athlete_derived.iter().map(|d| d.get(key)).collect::<Vec<_>>();
            let athlete_avg = descriptive::mean(&values);
            let z = z_score(key, athlete_avg, baseline.get(key));
            StatScore::new(key, attention_score(key, z))
        })
        .collect::<Vec<_>>();

    let mut all_scores = scores.clone();
    all_scores.sort_by(by_score);

    let attention_areas = all_scores
        .iter()
        .filter(|s| s.score < 0.0)
        .take(MAX_AREAS)
        .copied()
        .collect();

    let mut strengths = scores
        .into_iter()
        .filter(|s| s.score > 0.0)
        .collect::<Vec<_>>();
    strengths.sort_by(|a, b| by_score(b, a));
    strengths.truncate(MAX_AREAS);

    PerformanceAnalysis {
        attention_areas,
        excellence_areas: strengths,
        all_scores,
    }
}

/// Returns only the attention areas of [`analyze_player_performance`].
pub fn calculate_attention_score<P>(
    athlete_id: AthleteId,
    records: &P,
    games_limit: u32,
) -> Vec<StatScore>
where
    P: GameRecordProvider + ?Sized,
{
    analyze_player_performance(athlete_id, records, games_limit).attention_areas
}
