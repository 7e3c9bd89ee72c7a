use std::{io::Write, path::PathBuf};

use airtree_learn::{Dataset, Session, TrainConfig};
use anyhow::{Context, Result};
use clap::Args;

use super::{OutputFormat, render};

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with sensor readings and a category column
    pub csv: PathBuf,
    /// Where to save the trained model (.json, .yaml or .yml)
    #[arg(long)]
    pub model: PathBuf,
    /// Training config YAML; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Share of rows held out for testing, e.g. 0.2
    #[arg(long)]
    pub test_fraction: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl TrainArgs {
    fn config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::from_yaml_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TrainConfig::from_default_yaml()?,
        };
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(test_fraction) = self.test_fraction {
            config.test_fraction = test_fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: TrainArgs) -> Result<()> {
    let config = args.config()?;
    let dataset = Dataset::from_csv_path(&args.csv)
        .with_context(|| format!("failed to load dataset {}", args.csv.display()))?;

    let mut session = Session::new();
    session.load_data(dataset)?;
    let report = session.train(&config)?;
    let model = session.model()?;

    model
        .save(&args.model)
        .with_context(|| format!("failed to save model {}", args.model.display()))?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            render::training_report(&mut stdout, &report, model.class_names())?;
            writeln!(stdout)?;
            writeln!(stdout, "model saved to {}", args.model.display())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
