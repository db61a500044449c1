use std::path::PathBuf;

use anyhow::Context as _;
use courtside_analysis::attention::CHART_GAMES_LIMIT;
use courtside_core::{AthleteRoster as _, PracticeCatalog as _};
use courtside_recommender::{RegimenPlanner, regimen::RegimenFocus};

use crate::{
    command::training::TrainingArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlanRegimenArg {
    /// Path to the regimen JSON file
    regimen: PathBuf,
    /// Path to the game records JSON file
    #[arg(long, default_value = "data/game_records.json")]
    records: PathBuf,
    /// Path to the drills JSON file
    #[arg(long, default_value = "data/drills.json")]
    drills: PathBuf,
    /// Path to the athletes JSON file
    #[arg(long, default_value = "data/athletes.json")]
    athletes: PathBuf,
    /// Path to the practice categories JSON file
    #[arg(long, default_value = "data/practices.json")]
    practices: PathBuf,
    /// Use a forest saved by `build-forest` instead of training one
    #[arg(long)]
    forest: Option<PathBuf>,
    #[clap(flatten)]
    training: TrainingArg,
    /// Number of most recent games to analyze per athlete
    #[arg(long, default_value_t = CHART_GAMES_LIMIT)]
    games_limit: u32,
    /// Id given to the first athlete regimen
    #[arg(long, default_value_t = 1)]
    first_id: u32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlanRegimenArg) -> anyhow::Result<()> {
    let regimen = util::read_regimen_file(&arg.regimen)?;
    let records = util::read_game_records_file(&arg.records)?;
    let drills = util::read_drills_file(&arg.drills)?;
    let athletes = util::read_athletes_file(&arg.athletes)?;
    let practices = util::read_practices_file(&arg.practices)?;

    for athlete_id in &regimen.assigned_athletes {
        anyhow::ensure!(
            athletes.athlete(*athlete_id).is_some(),
            "Regimen {} assigns unknown athlete {athlete_id}",
            regimen.id
        );
    }
    let focus = match regimen.focus {
        RegimenFocus::AthleteSpecific => "athlete specific".to_owned(),
        RegimenFocus::PracticeCategory { category_id } => {
            let practice = practices.practice(category_id).with_context(|| {
                format!(
                    "Regimen {} focuses on unknown practice category {category_id}",
                    regimen.id
                )
            })?;
            format!("practice category {}", practice.name)
        }
    };
    eprintln!(
        "Planning regimen {} \"{}\" ({focus}, {} drills, due {})",
        regimen.id, regimen.name, regimen.drill_limit, regimen.due_date
    );

    let forest = arg.training.load_or_build(arg.forest.as_deref(), &drills)?;
    let planner = RegimenPlanner {
        games_limit: arg.games_limit,
        ..RegimenPlanner::new(forest.trees())
    };
    let planned = planner.plan(&regimen, &drills, &records, arg.first_id)?;

    for athlete_regimen in &planned {
        let name = athletes
            .athlete(athlete_regimen.assigned_athlete_id)
            .map(courtside_core::Athlete::display_name)
            .unwrap_or_default();
        let (completed, total) = athlete_regimen.progress();
        eprintln!(
            "  {name} (#{}): {:?} ({completed}/{total} completed)",
            athlete_regimen.assigned_athlete_id, athlete_regimen.drills
        );
    }

    Output::save_json(&planned, arg.output.clone())?;
    Ok(())
}
