//! The fixed statistic vocabulary shared by scoring, drills and training samples.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

/// Whether a larger value of a statistic is good or bad for the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum StatImpact {
    /// Higher is better (`+1`).
    Positive,
    /// Higher is worse (`-1`).
    Negative,
}

impl StatImpact {
    /// Returns the impact as `+1.0` or `-1.0`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// One of the ten per-game statistics tracked for every athlete.
///
/// Variants are declared in canonical order; iteration over [`StatKey::ALL`],
/// `Ord` and every [`StatMap`] follow it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum StatKey {
    #[serde(rename = "FG_PCT")]
    #[display("FG_PCT")]
    FgPct,
    #[serde(rename = "_2PTS_PCT")]
    #[display("_2PTS_PCT")]
    TwoPtsPct,
    #[serde(rename = "_3PTS_PCT")]
    #[display("_3PTS_PCT")]
    ThreePtsPct,
    #[serde(rename = "FT_PCT")]
    #[display("FT_PCT")]
    FtPct,
    #[serde(rename = "REB")]
    #[display("REB")]
    Rebounds,
    #[serde(rename = "assists")]
    #[display("assists")]
    Assists,
    #[serde(rename = "steals")]
    #[display("steals")]
    Steals,
    #[serde(rename = "blocks")]
    #[display("blocks")]
    Blocks,
    #[serde(rename = "turnovers")]
    #[display("turnovers")]
    Turnovers,
    #[serde(rename = "points")]
    #[display("points")]
    Points,
}

impl StatKey {
    pub const LEN: usize = 10;

    pub const ALL: [Self; Self::LEN] = [
        Self::FgPct,
        Self::TwoPtsPct,
        Self::ThreePtsPct,
        Self::FtPct,
        Self::Rebounds,
        Self::Assists,
        Self::Steals,
        Self::Blocks,
        Self::Turnovers,
        Self::Points,
    ];

    /// Returns the identifier used in data files (`"FG_PCT"`, `"turnovers"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FgPct => "FG_PCT",
            Self::TwoPtsPct => "_2PTS_PCT",
            Self::ThreePtsPct => "_3PTS_PCT",
            Self::FtPct => "FT_PCT",
            Self::Rebounds => "REB",
            Self::Assists => "assists",
            Self::Steals => "steals",
            Self::Blocks => "blocks",
            Self::Turnovers => "turnovers",
            Self::Points => "points",
        }
    }

    /// Returns the human-readable label shown next to a score.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FgPct => "FG% Efficiency",
            Self::TwoPtsPct => "2PT% Efficiency",
            Self::ThreePtsPct => "3PT% Efficiency",
            Self::FtPct => "FT% Efficiency",
            Self::Rebounds => "Rebounding (Total)",
            Self::Assists => "Assists",
            Self::Steals => "Steals (Defense)",
            Self::Blocks => "Blocks (Defense)",
            Self::Turnovers => "Turnovers",
            Self::Points => "Scoring (Points)",
        }
    }

    #[must_use]
    pub const fn impact(self) -> StatImpact {
        match self {
            Self::Turnovers => StatImpact::Negative,
            _ => StatImpact::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown stat key '{key}'")]
pub struct ParseStatKeyError {
    pub key: String,
}

impl FromStr for StatKey {
    type Err = ParseStatKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseStatKeyError { key: s.to_owned() })
    }
}

/// A partial mapping from [`StatKey`] to a score.
///
/// Absent keys are meaningful: lookups through [`StatMap::get_or_zero`] treat a
/// missing stat as `0.0`, which is how attention profiles and training features
/// are compared everywhere in the recommender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<StatKey, f64>);

impl StatMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// Returns the value for `key`, or `0.0` when the key is absent.
    #[must_use]
    pub fn get_or_zero(&self, key: StatKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn insert(&mut self, key: StatKey, value: f64) -> Option<f64> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = StatKey> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(StatKey, f64)> for StatMap {
    fn from_iter<T: IntoIterator<Item = (StatKey, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(StatKey, f64); N]> for StatMap {
    fn from(entries: [(StatKey, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
