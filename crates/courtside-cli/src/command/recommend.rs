use std::path::PathBuf;

use courtside_analysis::attention::{CHART_GAMES_LIMIT, analyze_player_performance};
use courtside_core::{AthleteId, AthleteRoster as _, Drill, DrillCatalog as _, DrillId};
use courtside_recommender::{
    PredictorParams,
    predictor::{Candidate, score_candidates, select_diverse},
};
use serde::Serialize;

use crate::{
    command::{analyze::print_scores, training::TrainingArg},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RecommendArg {
    /// Athlete number to recommend drills for
    athlete: AthleteId,
    /// Path to the game records JSON file
    #[arg(long, default_value = "data/game_records.json")]
    records: PathBuf,
    /// Path to the drills JSON file
    #[arg(long, default_value = "data/drills.json")]
    drills: PathBuf,
    /// Path to the athletes JSON file
    #[arg(long, default_value = "data/athletes.json")]
    athletes: PathBuf,
    /// Use a forest saved by `build-forest` instead of training one
    #[arg(long)]
    forest: Option<PathBuf>,
    #[clap(flatten)]
    training: TrainingArg,
    /// Number of most recent games to analyze
    #[arg(long, default_value_t = CHART_GAMES_LIMIT)]
    games_limit: u32,
    /// Maximum number of drills to recommend
    #[arg(long, default_value_t = PredictorParams::default().max_recommendations)]
    max_recommendations: usize,
    /// Also write the recommendations as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Recommendation<'a> {
    rank: usize,
    name: &'a str,
    #[serde(flatten)]
    candidate: &'a Candidate,
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let records = util::read_game_records_file(&arg.records)?;
    let drills = util::read_drills_file(&arg.drills)?;
    let athletes = util::read_athletes_file(&arg.athletes)?;
    let name = athletes
        .athlete(arg.athlete)
        .map_or_else(|| format!("Athlete #{}", arg.athlete), |a| a.display_name());

    let analysis = analyze_player_performance(arg.athlete, &records, arg.games_limit);
    let attention = analysis.attention_map();

    let forest = arg.training.load_or_build(arg.forest.as_deref(), &drills)?;
    let params = PredictorParams {
        max_recommendations: arg.max_recommendations,
        ..PredictorParams::default()
    };
    let candidates = score_candidates(forest.trees(), &attention, &drills);
    let selected = select_diverse(&candidates, &attention, &params);

    println!("Drill Recommendations: {name} (#{})", arg.athlete);
    println!("==========================================\n");
    print_scores("Needs attention", &analysis.attention_areas);
    println!();

    if selected.is_empty() {
        println!("No drills to recommend.");
    }

    let recommendations = selected
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let candidate = candidates.iter().find(|c| c.id == *id)?;
            let name = drill_name(&drills, *id);
            Some(Recommendation {
                rank: i + 1,
                name,
                candidate,
            })
        })
        .collect::<Vec<_>>();

    if !recommendations.is_empty() {
        println!(
            "{:>4}  {:>4}  {:<28} {:>5} {:>9} {:>8} {:>8}",
            "rank", "id", "drill", "votes", "relevance", "score", "coverage"
        );
        for r in &recommendations {
            println!(
                "{:>4}  {:>4}  {:<28} {:>5} {:>9.3} {:>8.3} {:>8.3}",
                r.rank,
                r.candidate.id,
                r.name,
                r.candidate.votes,
                r.candidate.relevance,
                r.candidate.score,
                r.candidate.coverage_score
            );
        }
    }

    if let Some(path) = &arg.output {
        Output::save_json(&recommendations, Some(path.clone()))?;
    }
    Ok(())
}

fn drill_name(drills: &[Drill], id: DrillId) -> &str {
    drills.drill(id).map_or("(unknown drill)", |d| d.name.as_str())
}
