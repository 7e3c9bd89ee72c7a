use std::{fs, path::Path};

use airtree_core::TreeArrays;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{LearnError, MinMaxScaler, TrainConfig, TrainedModel};

/// Version written into every saved bundle.
pub const BUNDLE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything a prediction needs, in one serializable record.
pub struct ModelBundle {
    pub schema_version: u32,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
    pub scaler: MinMaxScaler,
    pub config: TrainConfig,
    pub tree: TreeArrays,
}

impl ModelBundle {
    /// Validate the bundle and rebuild the runtime model.
    pub fn compile(&self) -> Result<TrainedModel, LearnError> {
        if self.schema_version != BUNDLE_SCHEMA_VERSION {
            return Err(LearnError::SchemaVersion {
                found: self.schema_version,
                expected: BUNDLE_SCHEMA_VERSION,
            });
        }
        TrainedModel::new(
            self.tree.to_tree()?,
            self.scaler.clone(),
            self.feature_names.clone(),
            self.class_names.clone(),
            self.config.clone(),
        )
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Load a model bundle from disk; `.yaml`/`.yml` files are YAML, anything else JSON.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<ModelBundle, LearnError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let bundle: ModelBundle = if is_yaml(path) {
        serde_yaml::from_str(&text)?
    } else {
        serde_json::from_str(&text)?
    };
    info!(
        path = %path.display(),
        nodes = bundle.tree.node_count(),
        classes = bundle.class_names.len(),
        "loaded model bundle"
    );
    Ok(bundle)
}

/// Serialize and write a model bundle, creating parent directories as needed.
pub fn save_bundle(path: impl AsRef<Path>, bundle: &ModelBundle) -> Result<(), LearnError> {
    let path = path.as_ref();
    let text = if is_yaml(path) {
        serde_yaml::to_string(bundle)?
    } else {
        serde_json::to_string_pretty(bundle)?
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!(path = %path.display(), "saved model bundle");
    Ok(())
}
