use std::{io::Write, path::PathBuf};

use airtree_learn::{Dataset, Session};
use anyhow::{Context, Result};
use clap::Args;

use super::render;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// CSV file with sensor readings and a category column
    pub csv: PathBuf,
    /// Write the min-max normalized rows to this CSV file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let dataset = Dataset::from_csv_path(&args.csv)
        .with_context(|| format!("failed to load dataset {}", args.csv.display()))?;

    let mut session = Session::new();
    session.load_data(dataset)?;

    let mut stdout = std::io::stdout().lock();
    render::dataset_summary(&mut stdout, session.raw_data()?, session.scaler()?)?;

    if let Some(out) = &args.out {
        session
            .normalized_data()?
            .write_csv(out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        writeln!(stdout)?;
        writeln!(stdout, "normalized data written to {}", out.display())?;
    }
    Ok(())
}
