use std::path::PathBuf;

use crate::{
    command::training::TrainingArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BuildForestArg {
    /// Path to the drills JSON file (used for synthetic samples)
    #[arg(long, default_value = "data/drills.json")]
    drills: PathBuf,
    #[clap(flatten)]
    training: TrainingArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BuildForestArg) -> anyhow::Result<()> {
    let drills = util::read_drills_file(&arg.drills)?;
    let forest = arg.training.build_forest(&drills)?;

    for (i, tree) in forest.trees().iter().enumerate() {
        eprintln!(
            "  tree {i:>2}: depth {}, {} leaves",
            tree.depth(),
            tree.leaf_count()
        );
    }

    Output::save_json(&forest, arg.output.clone())?;
    Ok(())
}
