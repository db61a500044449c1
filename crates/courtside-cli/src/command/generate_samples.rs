use std::path::PathBuf;

use courtside_core::StatKey;
use courtside_recommender::{generate_synthetic_samples, synthetic::DEFAULT_SAMPLE_COUNT};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateSamplesArg {
    /// Path to the drills JSON file
    #[arg(long, default_value = "data/drills.json")]
    drills: PathBuf,
    /// Number of samples to attempt (samples no drill matches are dropped)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    count: usize,
    /// Stats to draw sample features from, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    stats: Vec<StatKey>,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateSamplesArg) -> anyhow::Result<()> {
    let drills = util::read_drills_file(&arg.drills)?;
    let mut rng = util::make_rng(arg.seed);

    let stat_keys = if arg.stats.is_empty() {
        StatKey::ALL.to_vec()
    } else {
        arg.stats.clone()
    };

    eprintln!("Generating {} synthetic samples...", arg.count);
    let generated = generate_synthetic_samples(&drills, &stat_keys, arg.count, &mut rng);
    eprintln!(
        "Kept {} of {} samples",
        generated.samples.len(),
        arg.count
    );
    eprintln!("Stat usage:");
    for (stat, count) in &generated.stat_usage {
        eprintln!("  {:<10} {count}", stat.as_str());
    }

    Output::save_json(&generated.samples, arg.output.clone())?;
    Ok(())
}
