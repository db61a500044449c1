//! Coach-defined regimens and the per-athlete drill lists planned from them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use courtside_analysis::attention::{CHART_GAMES_LIMIT, analyze_player_performance};
use courtside_core::{AthleteId, CategoryId, DrillCatalog, DrillId, GameRecordProvider};
use serde::{Deserialize, Serialize};

use crate::{
    predictor::{PredictorParams, predict_forest_weighted_with},
    tree::TreeNode,
};

pub const MIN_DRILL_LIMIT: usize = 1;
pub const MAX_DRILL_LIMIT: usize = 6;
pub const DEFAULT_DRILL_LIMIT: usize = 3;

fn default_drill_limit() -> usize {
    DEFAULT_DRILL_LIMIT
}

/// Where a regimen draws its drills from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegimenFocus {
    /// Recommend from the whole catalog based on each athlete's attention areas.
    AthleteSpecific,
    /// Recommend only from one practice category.
    PracticeCategory { category_id: CategoryId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regimen {
    pub id: u32,
    pub name: String,
    pub duration_minutes: u32,
    pub due_date: NaiveDate,
    pub assigned_athletes: Vec<AthleteId>,
    pub focus: RegimenFocus,
    #[serde(default = "default_drill_limit")]
    pub drill_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidRegimenError {
    #[display("regimen {regimen_id}: drill limit {limit} is outside 1..=6")]
    DrillLimitOutOfRange { regimen_id: u32, limit: usize },
    #[display("regimen {regimen_id} has no assigned athletes")]
    NoAthletes { regimen_id: u32 },
}

impl Regimen {
    pub fn validate(&self) -> Result<(), InvalidRegimenError> {
        if !(MIN_DRILL_LIMIT..=MAX_DRILL_LIMIT).contains(&self.drill_limit) {
            return Err(InvalidRegimenError::DrillLimitOutOfRange {
                regimen_id: self.id,
                limit: self.drill_limit,
            });
        }
        if self.assigned_athletes.is_empty() {
            return Err(InvalidRegimenError::NoAthletes {
                regimen_id: self.id,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum DrillStatus {
    Completed,
    Pending,
    NotStarted,
}

/// One athlete's copy of a regimen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteRegimen {
    pub id: u32,
    pub from_regimen_id: u32,
    pub assigned_athlete_id: AthleteId,
    pub drills: Vec<DrillId>,
    pub status: BTreeMap<DrillId, DrillStatus>,
}

impl AthleteRegimen {
    /// `(completed, total)` drill counts.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let completed = self.status.values().filter(|s| s.is_completed()).count();
        (completed, self.drills.len())
    }

    /// Updates a drill's status. Returns `false` if the drill is not part of
    /// this regimen.
    pub fn set_status(&mut self, drill: DrillId, status: DrillStatus) -> bool {
        match self.status.get_mut(&drill) {
            Some(s) => {
                *s = status;
                true
            }
            None => false,
        }
    }
}

/// Expands a [`Regimen`] into one [`AthleteRegimen`] per assigned athlete.
#[derive(Debug, Clone, Copy)]
pub struct RegimenPlanner<'a> {
    pub forest: &'a [TreeNode],
    pub games_limit: u32,
    pub predictor: PredictorParams,
}

impl<'a> RegimenPlanner<'a> {
    #[must_use]
    pub fn new(forest: &'a [TreeNode]) -> Self {
        Self {
            forest,
            games_limit: CHART_GAMES_LIMIT,
            predictor: PredictorParams::default(),
        }
    }

    /// Plans drills for every assigned athlete.
    ///
    /// Athlete regimen ids are assigned sequentially starting at `first_id`.
    pub fn plan<D, G>(
        &self,
        regimen: &Regimen,
        drills: &D,
        records: &G,
        first_id: u32,
    ) -> Result<Vec<AthleteRegimen>, InvalidRegimenError>
    where
        D: DrillCatalog + ?Sized,
        G: GameRecordProvider + ?Sized,
    {
        regimen.validate()?;

        let category_drills = match regimen.focus {
            RegimenFocus::AthleteSpecific => None,
            RegimenFocus::PracticeCategory { category_id } => {
                Some(drills.drills_in_category(category_id))
            }
        };

        let planned = regimen
            .assigned_athletes
            .iter()
            .zip(first_id..)
            .map(|(&athlete_id, id)| {
                let analysis = analyze_player_performance(athlete_id, records, self.games_limit);
                let attention = analysis.attention_map();
                let mut selected = match &category_drills {
                    Some(category) => predict_forest_weighted_with(
                        self.forest,
                        &attention,
                        category,
                        &self.predictor,
                    ),
                    None => {
                        predict_forest_weighted_with(self.forest, &attention, drills, &self.predictor)
                    }
                };
                selected.truncate(regimen.drill_limit);
                tracing::debug!(
                    regimen_id = regimen.id,
                    athlete_id,
                    drills = ?selected,
                    "planned athlete regimen"
                );

                AthleteRegimen {
                    id,
                    from_regimen_id: regimen.id,
                    assigned_athlete_id: athlete_id,
                    status: selected
                        .iter()
                        .map(|&drill| (drill, DrillStatus::NotStarted))
                        .collect(),
                    drills: selected,
                }
            })
            .collect();
        Ok(planned)
    }
}
