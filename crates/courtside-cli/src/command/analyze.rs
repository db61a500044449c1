use std::path::PathBuf;

use courtside_analysis::attention::{CHART_GAMES_LIMIT, StatScore, analyze_player_performance};
use courtside_core::{AthleteId, AthleteRoster as _};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Athlete number to analyze
    athlete: AthleteId,
    /// Path to the game records JSON file
    #[arg(long, default_value = "data/game_records.json")]
    records: PathBuf,
    /// Path to the athletes JSON file
    #[arg(long, default_value = "data/athletes.json")]
    athletes: PathBuf,
    /// Number of most recent games to analyze
    #[arg(long, default_value_t = CHART_GAMES_LIMIT)]
    games_limit: u32,
    /// Also write the analysis as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let records = util::read_game_records_file(&arg.records)?;
    let athletes = util::read_athletes_file(&arg.athletes)?;
    let name = athletes
        .athlete(arg.athlete)
        .map_or_else(|| format!("Athlete #{}", arg.athlete), |a| a.display_name());

    let analysis = analyze_player_performance(arg.athlete, &records, arg.games_limit);

    println!(
        "Performance Report: {name} (#{}), last {} games",
        arg.athlete, arg.games_limit
    );
    println!("==========================================\n");

    if analysis.is_empty() {
        println!("No game records for this athlete in the recent window.");
    } else {
        print_scores("Needs attention", &analysis.attention_areas);
        println!();
        print_scores("Excellence", &analysis.excellence_areas);
        println!();
        print_scores("All stats", &analysis.all_scores);
    }

    if let Some(path) = &arg.output {
        Output::save_json(&analysis, Some(path.clone()))?;
    }
    Ok(())
}

pub(crate) fn print_scores(title: &str, scores: &[StatScore]) {
    println!("{title}:");
    if scores.is_empty() {
        println!("  (none)");
    }
    for score in scores {
        println!("  {:<20} {:>10} {:>8.3}", score.label, score.stat.as_str(), score.score);
    }
}
