//! Command-line surface.
//!
//! - `normalize`: validate a dataset and summarize its scaling
//! - `train`: fit, evaluate and save a model
//! - `rules`: list the rules of a saved model
//! - `predict`: classify one set of readings and show the path taken

use clap::{Parser, Subcommand, ValueEnum};

pub mod normalize;
pub mod predict;
pub mod render;
pub mod rules;
pub mod train;

/// Air-quality decision tree toolkit
#[derive(Parser, Debug)]
#[command(name = "airtree")]
#[command(about = "Train air-quality decision trees and explain them as rules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a dataset and show how it normalizes
    Normalize(normalize::NormalizeArgs),
    /// Train a model on a dataset and save it
    Train(train::TrainArgs),
    /// List the decision rules of a saved model
    Rules(rules::RulesArgs),
    /// Classify one set of sensor readings
    Predict(predict::PredictArgs),
}

/// Output format for report-style commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Run the CLI command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Normalize(args) => normalize::run(args),
        Commands::Train(args) => train::run(args),
        Commands::Rules(args) => rules::run(args),
        Commands::Predict(args) => predict::run(args),
    }
}
