use airtree_core::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for dataset loading, training, persistence and session handling.
pub enum LearnError {
    #[error("failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("CSV file is empty or has no header row")]
    MissingHeader,

    #[error("CSV is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: column '{column}' holds '{value}', which is not a finite number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("line {line}: empty value in column '{column}'")]
    EmptyLabel { line: usize, column: String },

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("expected {expected} values per row, got {found}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("label {label} is out of range for {class_count} classes")]
    LabelOutOfRange { label: usize, class_count: usize },

    #[error("at least two rows are needed to split into train and test sets, got {rows}")]
    TooFewRows { rows: usize },

    #[error("label '{name}' is not one of the model's classes")]
    UnknownLabel { name: String },

    #[error("class '{name}' has no air-quality category; class names may have drifted from training")]
    UnknownCategory { name: String },

    #[error("all input values are zero; enter real measurements")]
    AllZeroInput,

    #[error("invalid training config: {0}")]
    Config(String),

    #[error("model bundle schema version {found} is not supported (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("cannot {operation} while the session is {phase}")]
    Session {
        operation: &'static str,
        phase: crate::session::Phase,
    },
}
