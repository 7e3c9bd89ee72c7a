use std::{io::Write, path::PathBuf};

use airtree_learn::TrainedModel;
use anyhow::{Context, Result};
use clap::Args;

use super::{OutputFormat, render};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Saved model file
    #[arg(long)]
    pub model: PathBuf,
    /// Show at most this many rules
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn run(args: RulesArgs) -> Result<()> {
    let model = TrainedModel::load(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    let rules = model.rules()?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => render::rules_listing(&mut stdout, &rules, args.limit)?,
        OutputFormat::Json => {
            let shown = args.limit.unwrap_or(rules.len()).min(rules.len());
            serde_json::to_writer_pretty(&mut stdout, &rules[..shown])?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
