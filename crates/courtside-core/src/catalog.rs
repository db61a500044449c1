//! Reference data (drills, practice categories, athletes) and the provider
//! traits through which the scorer and recommender read it.
//!
//! Nothing in the engine depends on module-level data: every component takes a
//! provider, so tests can hand in fixtures and the CLI can hand in JSON files.

use serde::{Deserialize, Serialize};

use crate::{AthleteId, GameRecord, StatKey, TrainingSample};

pub type DrillId = u32;
pub type CategoryId = u32;

/// A training drill and the statistics it is meant to improve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    pub id: DrillId,
    /// Practice category this drill belongs to.
    pub from_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    /// Targeted stats in priority order; position decides the relevance weight.
    #[serde(default)]
    pub good_for: Vec<StatKey>,
}

impl Drill {
    /// Creates a drill with only the fields the recommender looks at.
    #[must_use]
    pub fn new(id: DrillId, good_for: impl Into<Vec<StatKey>>) -> Self {
        Self {
            id,
            from_id: 0,
            name: format!("Drill #{id}"),
            description: String::new(),
            steps: vec![],
            good_for: good_for.into(),
        }
    }

    #[must_use]
    pub fn is_good_for(&self, stat: StatKey) -> bool {
        self.good_for.contains(&stat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skill: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub athlete_no: AthleteId,
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub player_no: String,
    #[serde(default)]
    pub gmail: String,
}

impl Athlete {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub trait DrillCatalog {
    fn drills(&self) -> &[Drill];

    fn drill(&self, id: DrillId) -> Option<&Drill> {
        self.drills().iter().find(|d| d.id == id)
    }

    /// Drills belonging to one practice category, in catalog order.
    fn drills_in_category(&self, category: CategoryId) -> Vec<Drill> {
        self.drills()
            .iter()
            .filter(|d| d.from_id == category)
            .cloned()
            .collect()
    }
}

pub trait GameRecordProvider {
    fn game_records(&self) -> &[GameRecord];
}

pub trait AthleteRoster {
    fn athletes(&self) -> &[Athlete];

    fn athlete(&self, id: AthleteId) -> Option<&Athlete> {
        self.athletes().iter().find(|a| a.athlete_no == id)
    }
}

pub trait PracticeCatalog {
    fn practices(&self) -> &[PracticeCategory];

    fn practice(&self, id: CategoryId) -> Option<&PracticeCategory> {
        self.practices().iter().find(|p| p.id == id)
    }
}

impl DrillCatalog for [Drill] {
    fn drills(&self) -> &[Drill] {
        self
    }
}

impl DrillCatalog for Vec<Drill> {
    fn drills(&self) -> &[Drill] {
        self
    }
}

impl GameRecordProvider for [GameRecord] {
    fn game_records(&self) -> &[GameRecord] {
        self
    }
}

impl GameRecordProvider for Vec<GameRecord> {
    fn game_records(&self) -> &[GameRecord] {
        self
    }
}

impl AthleteRoster for [Athlete] {
    fn athletes(&self) -> &[Athlete] {
        self
    }
}

impl AthleteRoster for Vec<Athlete> {
    fn athletes(&self) -> &[Athlete] {
        self
    }
}

impl PracticeCatalog for [PracticeCategory] {
    fn practices(&self) -> &[PracticeCategory] {
        self
    }
}

impl PracticeCatalog for Vec<PracticeCategory> {
    fn practices(&self) -> &[PracticeCategory] {
        self
    }
}

/// An in-memory bundle of every reference dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub athletes: Vec<Athlete>,
    #[serde(default)]
    pub practices: Vec<PracticeCategory>,
    #[serde(default)]
    pub drills: Vec<Drill>,
    #[serde(default)]
    pub game_records: Vec<GameRecord>,
    #[serde(default)]
    pub training_samples: Vec<TrainingSample>,
}

impl DrillCatalog for Dataset {
    fn drills(&self) -> &[Drill] {
        &self.drills
    }
}

impl GameRecordProvider for Dataset {
    fn game_records(&self) -> &[GameRecord] {
        &self.game_records
    }
}

impl AthleteRoster for Dataset {
    fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }
}

impl PracticeCatalog for Dataset {
    fn practices(&self) -> &[PracticeCategory] {
        &self.practices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_lookup_by_id_and_category() {
        let dataset = Dataset {
            drills: vec![
                Drill {
                    from_id: 1,
                    ..Drill::new(1, [StatKey::ThreePtsPct])
                },
                Drill {
                    from_id: 2,
                    ..Drill::new(2, [StatKey::Turnovers])
                },
                Drill {
                    from_id: 1,
                    ..Drill::new(3, [StatKey::FgPct, StatKey::Points])
                },
            ],
            ..Dataset::default()
        };
        assert_eq!(dataset.drill(2).map(|d| d.from_id), Some(2));
        assert!(dataset.drill(9).is_none());
        let ids = dataset
            .drills_in_category(1)
            .iter()
            .map(|d| d.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_drill_good_for_parses_stat_keys() {
        let json = r#"{"id": 4, "from_id": 2, "name": "Cone Drill",
            "steps": ["1. Set up cones."], "good_for": ["turnovers", "assists"]}"#;
        let drill: Drill = serde_json::from_str(json).unwrap();
        assert_eq!(drill.good_for, [StatKey::Turnovers, StatKey::Assists]);
        assert!(drill.is_good_for(StatKey::Assists));
        assert!(!drill.is_good_for(StatKey::Points));
    }

    #[test]
    fn test_roster_and_practice_lookup() {
        let json = r#"[{"athlete_no": 3, "first_name": "Paolo", "second_name": "Santos",
            "last_name": "Sarmiento", "position": "Small Forward", "player_no": "15",
            "gmail": "paolo@example.com"}]"#;
        let athletes: Vec<Athlete> = serde_json::from_str(json).unwrap();
        assert_eq!(
            athletes.athlete(3).map(Athlete::display_name).as_deref(),
            Some("Paolo Sarmiento")
        );
        assert!(athletes.athlete(4).is_none());

        let practices = vec![PracticeCategory {
            id: 1,
            name: "Shooting Practice".to_owned(),
            description: String::new(),
            skill: vec!["shooting".to_owned()],
        }];
        assert_eq!(practices.practice(1).map(|p| p.name.as_str()), Some("Shooting Practice"));
        assert!(practices.practice(2).is_none());
    }

    #[test]
    fn test_unknown_stat_key_is_rejected() {
        let json = r#"{"id": 4, "from_id": 2, "name": "x", "good_for": ["dribbling"]}"#;
        assert!(serde_json::from_str::<Drill>(json).is_err());
    }
}
