use serde::{Deserialize, Serialize};

use crate::{Dataset, LearnError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-feature min-max scaling to `[0, 1]`, fitted on training data.
///
/// Values outside the fitted range map outside `[0, 1]`; constant columns map to 0.
pub struct MinMaxScaler {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
}

impl MinMaxScaler {
    /// Record the per-column range of a dataset.
    pub fn fit(dataset: &Dataset) -> Result<Self, LearnError> {
        Self::fit_rows(dataset.features())
    }

    /// Record the per-column range of a feature matrix.
    pub fn fit_rows(rows: &[Vec<f64>]) -> Result<Self, LearnError> {
        let first = rows.first().ok_or(LearnError::EmptyDataset)?;
        let mut data_min = first.clone();
        let mut data_max = first.clone();

        for row in &rows[1..] {
            if row.len() != data_min.len() {
                return Err(LearnError::SchemaMismatch {
                    expected: data_min.len(),
                    found: row.len(),
                });
            }
            for (i, &value) in row.iter().enumerate() {
                data_min[i] = data_min[i].min(value);
                data_max[i] = data_max[i].max(value);
            }
        }

        Ok(MinMaxScaler { data_min, data_max })
    }

    /// Number of columns the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.data_min.len()
    }

    pub fn data_min(&self) -> &[f64] {
        &self.data_min
    }

    pub fn data_max(&self) -> &[f64] {
        &self.data_max
    }

    /// Scale one row of raw readings.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, LearnError> {
        if row.len() != self.width() {
            return Err(LearnError::SchemaMismatch {
                expected: self.width(),
                found: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.data_min.iter().zip(&self.data_max))
            .map(|(&value, (&min, &max))| {
                let range = max - min;
                if range > 0.0 { (value - min) / range } else { 0.0 }
            })
            .collect())
    }

    /// Scale every row of a dataset, keeping names and labels.
    pub fn transform(&self, dataset: &Dataset) -> Result<Dataset, LearnError> {
        let features = dataset
            .features()
            .iter()
            .map(|row| self.transform_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        dataset.with_features(features)
    }
}
