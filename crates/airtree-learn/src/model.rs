use std::path::Path;

use airtree_core::{DecisionRule, DecisionTree, TreeArrays, extract_rules};
use serde::Serialize;
use tracing::info;

use crate::{
    AirQuality, Dataset, Evaluation, LearnError, MinMaxScaler, ModelBundle, TrainConfig,
    bundle::{BUNDLE_SCHEMA_VERSION, load_bundle, save_bundle},
    importance::feature_importances,
    split::train_test_split,
    trainer::train_tree,
};

#[derive(Debug, Clone, PartialEq)]
/// A fitted tree together with everything needed to score raw readings.
pub struct TrainedModel {
    tree: DecisionTree,
    scaler: MinMaxScaler,
    feature_names: Vec<String>,
    class_names: Vec<String>,
    config: TrainConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Outcome of one training run.
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub evaluation: Evaluation,
    /// `(feature name, importance)` sorted by decreasing importance.
    pub importances: Vec<(String, f64)>,
    pub rules: Vec<DecisionRule>,
}

#[derive(Debug, Clone, PartialEq)]
/// Predicted class of one raw sample and the path that produced it.
pub struct Prediction {
    pub class_index: usize,
    pub class_name: String,
    /// The sample after scaling, as the tree saw it.
    pub normalized: Vec<f64>,
    pub path: DecisionRule,
}

impl Prediction {
    /// Category of the predicted class; an unknown class name is an error, not a default.
    pub fn category(&self) -> Result<AirQuality, LearnError> {
        AirQuality::from_label(&self.class_name)
    }
}

impl TrainedModel {
    /// Assemble a model, checking the tree and scaler against the name tables.
    pub fn new(
        tree: DecisionTree,
        scaler: MinMaxScaler,
        feature_names: Vec<String>,
        class_names: Vec<String>,
        config: TrainConfig,
    ) -> Result<Self, LearnError> {
        tree.validate_names(feature_names.len(), class_names.len())?;
        if scaler.width() != feature_names.len() {
            return Err(LearnError::SchemaMismatch {
                expected: feature_names.len(),
                found: scaler.width(),
            });
        }
        Ok(TrainedModel {
            tree,
            scaler,
            feature_names,
            class_names,
            config,
        })
    }

    /// Split normalized data, grow a tree on the training rows and score it on the rest.
    pub fn fit(
        normalized: &Dataset,
        scaler: MinMaxScaler,
        config: &TrainConfig,
    ) -> Result<(Self, TrainingReport), LearnError> {
        config.validate()?;
        let class_names = normalized.class_names();
        let labels = normalized.encoded_labels(&class_names)?;
        let split = train_test_split(&labels, class_names.len(), config)?;

        let rows = normalized.features();
        let train_features: Vec<Vec<f64>> = split.train.iter().map(|&i| rows[i].clone()).collect();
        let train_labels: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();
        let tree = train_tree(&train_features, &train_labels, class_names.len(), config)?;

        let y_true: Vec<usize> = split.test.iter().map(|&i| labels[i]).collect();
        let y_pred = split
            .test
            .iter()
            .map(|&i| tree.predict_class_index(&rows[i]))
            .collect::<Result<Vec<_>, _>>()?;
        let evaluation = Evaluation::compute(&y_true, &y_pred, class_names.len())?;

        let model = Self::new(
            tree,
            scaler,
            normalized.feature_names().to_vec(),
            class_names,
            config.clone(),
        )?;
        let report = TrainingReport {
            train_size: split.train.len(),
            test_size: split.test.len(),
            evaluation,
            importances: model.importances()?,
            rules: model.rules()?,
        };

        info!(
            train = report.train_size,
            test = report.test_size,
            accuracy = report.evaluation.accuracy,
            nodes = model.tree.node_count(),
            leaves = model.tree.leaf_count(),
            depth = model.tree.max_depth(),
            "trained model"
        );
        Ok((model, report))
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn scaler(&self) -> &MinMaxScaler {
        &self.scaler
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Every root-to-leaf rule of the tree, in pre-order.
    pub fn rules(&self) -> Result<Vec<DecisionRule>, LearnError> {
        Ok(extract_rules(
            &self.tree,
            &self.feature_names,
            &self.class_names,
        )?)
    }

    /// Feature importances paired with names, most important first.
    pub fn importances(&self) -> Result<Vec<(String, f64)>, LearnError> {
        let importances = feature_importances(&self.tree, self.feature_names.len())?;
        let mut named: Vec<(String, f64)> = self
            .feature_names
            .iter()
            .cloned()
            .zip(importances)
            .collect();
        named.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(named)
    }

    /// Scale raw readings and classify them.
    ///
    /// A sample of nothing but zeros is refused as an empty form rather than a reading.
    pub fn predict(&self, raw: &[f64]) -> Result<Prediction, LearnError> {
        if raw.iter().all(|&value| value == 0.0) {
            return Err(LearnError::AllZeroInput);
        }
        let normalized = self.scaler.transform_row(raw)?;
        let path = self
            .tree
            .explain(&normalized, &self.feature_names, &self.class_names)?;
        Ok(Prediction {
            class_index: path.class_index,
            class_name: path.predicted_class.clone(),
            normalized,
            path,
        })
    }

    /// Serializable form of the model.
    pub fn to_bundle(&self) -> ModelBundle {
        ModelBundle {
            schema_version: BUNDLE_SCHEMA_VERSION,
            feature_names: self.feature_names.clone(),
            class_names: self.class_names.clone(),
            scaler: self.scaler.clone(),
            config: self.config.clone(),
            tree: TreeArrays::from(&self.tree),
        }
    }

    /// Write the model to disk; see [`save_bundle`] for the format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LearnError> {
        save_bundle(path, &self.to_bundle())
    }

    /// Read and validate a model written by [`TrainedModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LearnError> {
        load_bundle(path)?.compile()
    }
}
