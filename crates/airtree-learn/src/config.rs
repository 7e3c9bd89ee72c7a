use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::LearnError;

const DEFAULT_TRAIN_CONFIG_YAML: &str = include_str!("../config/train.default.yaml");

/// Deepest tree the trainer will grow regardless of configuration.
const MAX_DEPTH_LIMIT: usize = 64;

/// Training configuration for the split and the tree grower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Share of rows held out for evaluation, in `(0, 1)`.
    pub test_fraction: f64,
    pub max_depth: usize,
    /// Nodes with fewer rows are not split.
    pub min_samples_split: usize,
    /// Each side of a split keeps at least this many rows.
    pub min_samples_leaf: usize,
    pub seed: u64,
    /// Keep class proportions equal in both halves of the split.
    pub stratify: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            test_fraction: 0.2,
            max_depth: 7,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
            stratify: true,
        }
    }
}

impl TrainConfig {
    /// Parse a training config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LearnError> {
        let config: TrainConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a training config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, LearnError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_TRAIN_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, LearnError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), LearnError> {
        if !self.test_fraction.is_finite() || self.test_fraction <= 0.0 || self.test_fraction >= 1.0
        {
            return Err(LearnError::Config(
                "test_fraction must be strictly between 0 and 1".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(LearnError::Config(format!(
                "max_depth must be between 1 and {MAX_DEPTH_LIMIT}"
            )));
        }
        if self.min_samples_split < 2 {
            return Err(LearnError::Config(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(LearnError::Config(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
