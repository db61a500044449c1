//! Box-score records and the statistics derived from them.

use serde::{Deserialize, Serialize};

use crate::StatKey;

pub type AthleteId = u32;
pub type GameId = u32;

/// One athlete's box-score line for one game.
///
/// Field names on the wire follow the roster app's camelCase naming
/// (`madeFG`, `attempt3PTS`, `offRebound`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: u32,
    pub game_id: GameId,
    pub player_id: AthleteId,
    #[serde(rename = "madeFG")]
    pub made_fg: u32,
    #[serde(rename = "attemptFG")]
    pub attempt_fg: u32,
    #[serde(rename = "made2PTS")]
    pub made_2pts: u32,
    #[serde(rename = "attempt2PTS")]
    pub attempt_2pts: u32,
    #[serde(rename = "made3PTS")]
    pub made_3pts: u32,
    #[serde(rename = "attempt3PTS")]
    pub attempt_3pts: u32,
    #[serde(rename = "madeFT")]
    pub made_ft: u32,
    #[serde(rename = "attemptFT")]
    pub attempt_ft: u32,
    #[serde(rename = "offRebound")]
    pub off_rebound: u32,
    #[serde(rename = "defRebound")]
    pub def_rebound: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ShotType {
    #[display("field goals")]
    FieldGoal,
    #[display("2-pointers")]
    TwoPoint,
    #[display("3-pointers")]
    ThreePoint,
    #[display("free throws")]
    FreeThrow,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "game record {record_id} (player {player_id}, game {game_id}): {made} made {shot} exceeds {attempted} attempted"
)]
pub struct InvalidGameRecordError {
    pub record_id: u32,
    pub player_id: AthleteId,
    pub game_id: GameId,
    pub shot: ShotType,
    pub made: u32,
    pub attempted: u32,
}

/// Per-game statistics computed from a [`GameRecord`].
///
/// Shooting percentages are fractions in `[0, 1]` (given `made <= attempted`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub fg_pct: f64,
    pub two_pts_pct: f64,
    pub three_pts_pct: f64,
    pub ft_pct: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub points: f64,
}

impl DerivedStats {
    #[must_use]
    pub const fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::FgPct => self.fg_pct,
            StatKey::TwoPtsPct => self.two_pts_pct,
            StatKey::ThreePtsPct => self.three_pts_pct,
            StatKey::FtPct => self.ft_pct,
            StatKey::Rebounds => self.rebounds,
            StatKey::Assists => self.assists,
            StatKey::Steals => self.steals,
            StatKey::Blocks => self.blocks,
            StatKey::Turnovers => self.turnovers,
            StatKey::Points => self.points,
        }
    }
}

/// `made / attempted`, or `0.0` when nothing was attempted.
///
/// ```
/// # use courtside_core::percentage;
/// assert_eq!(percentage(3, 4), 0.75);
/// assert_eq!(percentage(0, 0), 0.0);
/// ```
#[must_use]
pub fn percentage(made: u32, attempted: u32) -> f64 {
    if attempted > 0 {
        f64::from(made) / f64::from(attempted)
    } else {
        0.0
    }
}

impl GameRecord {
    /// Computes shooting percentages, total rebounds and the raw counting stats.
    #[must_use]
    pub fn derive(&self) -> DerivedStats {
        DerivedStats {
            fg_pct: percentage(self.made_fg, self.attempt_fg),
            two_pts_pct: percentage(self.made_2pts, self.attempt_2pts),
            three_pts_pct: percentage(self.made_3pts, self.attempt_3pts),
            ft_pct: percentage(self.made_ft, self.attempt_ft),
            rebounds: f64::from(self.off_rebound) + f64::from(self.def_rebound),
            assists: f64::from(self.assists),
            steals: f64::from(self.steals),
            blocks: f64::from(self.blocks),
            turnovers: f64::from(self.turnovers),
            points: f64::from(self.points),
        }
    }

    /// Checks that no shot type has more makes than attempts.
    pub fn validate(&self) -> Result<(), InvalidGameRecordError> {
        let shots = [
            (ShotType::FieldGoal, self.made_fg, self.attempt_fg),
            (ShotType::TwoPoint, self.made_2pts, self.attempt_2pts),
            (ShotType::ThreePoint, self.made_3pts, self.attempt_3pts),
            (ShotType::FreeThrow, self.made_ft, self.attempt_ft),
        ];
        for (shot, made, attempted) in shots {
            if made > attempted {
                return Err(InvalidGameRecordError {
                    record_id: self.id,
                    player_id: self.player_id,
                    game_id: self.game_id,
                    shot,
                    made,
                    attempted,
                });
            }
        }
        Ok(())
    }
}
