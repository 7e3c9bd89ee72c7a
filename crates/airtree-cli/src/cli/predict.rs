use std::path::PathBuf;

use airtree_learn::{FEATURE_COLUMNS, TrainedModel};
use anyhow::{Context, Result, bail};
use clap::Args;

use super::render;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Saved model file
    #[arg(long)]
    pub model: PathBuf,
    /// Carbon monoxide, ppm
    #[arg(long)]
    pub co: f64,
    /// PM10, µg/m3
    #[arg(long)]
    pub pm10: f64,
    /// Nitrogen dioxide, ppb
    #[arg(long)]
    pub no2: f64,
    /// Temperature, °C
    #[arg(long)]
    pub temperature: f64,
    /// Relative humidity, %
    #[arg(long)]
    pub humidity: f64,
    /// Wind speed, m/s
    #[arg(long)]
    pub wind_speed: f64,
}

impl PredictArgs {
    /// Readings in dataset column order.
    fn sample(&self) -> [f64; 6] {
        [
            self.co,
            self.pm10,
            self.no2,
            self.temperature,
            self.humidity,
            self.wind_speed,
        ]
    }
}

pub fn run(args: PredictArgs) -> Result<()> {
    let model = TrainedModel::load(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    if model.feature_names() != FEATURE_COLUMNS {
        bail!(
            "model features [{}] do not match the sensor columns",
            model.feature_names().join(", ")
        );
    }

    let prediction = model.predict(&args.sample())?;
    let category = prediction.category()?;

    let mut stdout = std::io::stdout().lock();
    render::prediction(&mut stdout, &prediction, category)?;
    Ok(())
}
