use clap::{Parser, Subcommand};

use self::{
    analyze::AnalyzeArg, build_forest::BuildForestArg, generate_samples::GenerateSamplesArg,
    plan_regimen::PlanRegimenArg, recommend::RecommendArg,
};

mod analyze;
mod build_forest;
mod generate_samples;
mod plan_regimen;
mod recommend;
mod training;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Report an athlete's attention and excellence areas
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Recommend drills for an athlete
    Recommend(#[clap(flatten)] RecommendArg),
    /// Generate synthetic training samples from the drill catalog
    GenerateSamples(#[clap(flatten)] GenerateSamplesArg),
    /// Train a random forest and save it as JSON
    BuildForest(#[clap(flatten)] BuildForestArg),
    /// Plan per-athlete drill lists for a regimen
    PlanRegimen(#[clap(flatten)] PlanRegimenArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Recommend(arg) => recommend::run(&arg)?,
        Mode::GenerateSamples(arg) => generate_samples::run(&arg)?,
        Mode::BuildForest(arg) => build_forest::run(&arg)?,
        Mode::PlanRegimen(arg) => plan_regimen::run(&arg)?,
    }
    Ok(())
}
