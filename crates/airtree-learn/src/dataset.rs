use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use tracing::info;

use crate::LearnError;

/// Sensor columns every dataset must provide, in model feature order.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "CO (ppm)",
    "PM10 (µg/m3)",
    "NO2 (ppb)",
    "Suhu (°C)",
    "Kelembaban (%)",
    "Kecepatan Angin (m/s)",
];

/// Column holding the air-quality category of each row.
pub const TARGET_COLUMN: &str = "Kategori Kualitas Udara";

#[derive(Debug, Clone, PartialEq)]
/// Rows of sensor readings with their category labels.
pub struct Dataset {
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Dataset {
    /// Build a dataset, checking that every row has one value per feature name.
    pub fn new(
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<String>,
    ) -> Result<Self, LearnError> {
        if features.is_empty() {
            return Err(LearnError::EmptyDataset);
        }
        if labels.len() != features.len() {
            return Err(LearnError::SchemaMismatch {
                expected: features.len(),
                found: labels.len(),
            });
        }
        if let Some(row) = features.iter().find(|row| row.len() != feature_names.len()) {
            return Err(LearnError::SchemaMismatch {
                expected: feature_names.len(),
                found: row.len(),
            });
        }
        Ok(Dataset {
            feature_names,
            features,
            labels,
        })
    }

    /// Parse CSV text with a header row holding every required column.
    ///
    /// Columns may come in any order and extra columns are ignored.
    pub fn from_csv_str(text: &str) -> Result<Self, LearnError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(LearnError::MissingHeader)?;
        let header = split_record(header.trim_start_matches('\u{feff}'), header_line)?;

        let position = |name: &str| header.iter().position(|column| column == name);
        let missing: Vec<String> = FEATURE_COLUMNS
            .into_iter()
            .chain(std::iter::once(TARGET_COLUMN))
            .filter(|name| position(*name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LearnError::MissingColumns { missing });
        }

        let feature_positions: Vec<usize> =
            FEATURE_COLUMNS.into_iter().filter_map(position).collect();
        let target_position = position(TARGET_COLUMN).ok_or(LearnError::MissingColumns {
            missing: vec![TARGET_COLUMN.to_string()],
        })?;

        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (line, record) in lines {
            let fields = split_record(record, line)?;
            if fields.len() != header.len() {
                return Err(LearnError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: fields.len(),
                });
            }

            let mut row = Vec::with_capacity(FEATURE_COLUMNS.len());
            for (&column, name) in feature_positions.iter().zip(FEATURE_COLUMNS) {
                row.push(parse_number(&fields[column], line, name)?);
            }

            let label = fields[target_position].clone();
            if label.is_empty() {
                return Err(LearnError::EmptyLabel {
                    line,
                    column: TARGET_COLUMN.to_string(),
                });
            }

            features.push(row);
            labels.push(label);
        }

        let feature_names = FEATURE_COLUMNS.iter().map(|name| name.to_string()).collect();
        Self::new(feature_names, features, labels)
    }

    /// Load a dataset from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, LearnError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let dataset = Self::from_csv_str(&text)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            classes = dataset.class_names().len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Render the dataset as CSV, features first and the label last.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .feature_names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(TARGET_COLUMN))
            .map(quote_field)
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for (row, label) in self.features.iter().zip(&self.labels) {
            let mut fields: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            fields.push(quote_field(label));
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }

    /// Write the dataset as CSV to disk.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), LearnError> {
        fs::write(path, self.to_csv_string())?;
        Ok(())
    }

    /// Same labels and names with a new feature matrix.
    pub(crate) fn with_features(&self, features: Vec<Vec<f64>>) -> Result<Self, LearnError> {
        Self::new(self.feature_names.clone(), features, self.labels.clone())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct labels in ascending order; a class's position is its encoded label.
    pub fn class_names(&self) -> Vec<String> {
        self.labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Labels encoded as positions in `class_names`.
    pub fn encoded_labels(&self, class_names: &[String]) -> Result<Vec<usize>, LearnError> {
        self.labels
            .iter()
            .map(|label| {
                class_names
                    .iter()
                    .position(|name| name == label)
                    .ok_or_else(|| LearnError::UnknownLabel {
                        name: label.clone(),
                    })
            })
            .collect()
    }

    /// Number of rows per label.
    pub fn class_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Split one CSV record into trimmed fields; `""` inside quotes is a literal quote.
fn split_record(record: &str, line: usize) -> Result<Vec<String>, LearnError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LearnError::UnterminatedQuote { line });
    }
    fields.push(field.trim().to_string());
    Ok(fields)
}

fn parse_number(raw: &str, line: usize, column: &str) -> Result<f64, LearnError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LearnError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
