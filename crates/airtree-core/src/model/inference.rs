use crate::model::{
    error::{InvalidModelReason, ModelError},
    ids::NodeId,
    node::Node,
    rules::{Condition, DecisionRule, Operator, class_name, feature_name},
    tree::DecisionTree,
};

impl DecisionTree {
    /// Walk from the root to the leaf a sample falls into.
    ///
    /// `sample[feature] <= threshold` goes left, anything else (NaN included) goes right.
    pub fn predict_leaf(&self, sample: &[f64]) -> Result<NodeId, ModelError> {
        self.descend(sample, |_, _| {})
    }

    /// Node ids visited by a sample, root first and leaf last.
    pub fn decision_path(&self, sample: &[f64]) -> Result<Vec<NodeId>, ModelError> {
        let mut path = Vec::with_capacity(self.max_depth() + 1);
        let leaf = self.descend(sample, |node_id, _| path.push(node_id))?;
        path.push(leaf);
        Ok(path)
    }

    /// Majority class index of the leaf a sample reaches.
    pub fn predict_class_index(&self, sample: &[f64]) -> Result<usize, ModelError> {
        let leaf = self.predict_leaf(sample)?;
        self.leaf_class(leaf)
    }

    /// Predicted class name for a sample.
    pub fn predict<C: AsRef<str>>(
        &self,
        sample: &[f64],
        class_names: &[C],
    ) -> Result<String, ModelError> {
        let leaf = self.predict_leaf(sample)?;
        let class_index = self.leaf_class(leaf)?;
        class_name(class_names, class_index, leaf)
    }

    /// The rule a sample actually follows, built from the branches it takes.
    pub fn explain<F, C>(
        &self,
        sample: &[f64],
        feature_names: &[F],
        class_names: &[C],
    ) -> Result<DecisionRule, ModelError>
    where
        F: AsRef<str>,
        C: AsRef<str>,
    {
        self.validate_names(feature_names.len(), class_names.len())?;

        let mut steps = Vec::with_capacity(self.max_depth());
        let leaf = self.descend(sample, |node_id, went_left| steps.push((node_id, went_left)))?;

        let mut conditions = Vec::with_capacity(steps.len());
        for (node_id, went_left) in steps {
            if let Some((feature, threshold)) = self.node(node_id)?.split() {
                let operator = if went_left {
                    Operator::LessOrEqual
                } else {
                    Operator::Greater
                };
                let name = feature_name(feature_names, feature, node_id)?;
                conditions.push(Condition::new(feature, name, operator, threshold));
            }
        }

        let class_index = self.leaf_class(leaf)?;

        Ok(DecisionRule {
            leaf,
            conditions,
            class_index,
            predicted_class: class_name(class_names, class_index, leaf)?,
        })
    }

    fn leaf_class(&self, leaf: NodeId) -> Result<usize, ModelError> {
        self.node(leaf)?
            .majority_class()
            .ok_or(ModelError::InvalidModel {
                node_id: leaf,
                reason: InvalidModelReason::EmptyDistribution,
            })
    }

    /// Shared descent loop; `on_split` sees every internal node and the branch taken.
    fn descend<V>(&self, sample: &[f64], mut on_split: V) -> Result<NodeId, ModelError>
    where
        V: FnMut(NodeId, bool),
    {
        let mut current = self.root_id();

        for _ in 0..self.node_count() {
            match self.node(current)? {
                Node::Leaf { .. } => return Ok(current),
                Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let value = *sample.get(feature.index()).ok_or(ModelError::SampleTooShort {
                        feature: *feature,
                        sample_len: sample.len(),
                    })?;
                    let went_left = value <= *threshold;
                    on_split(current, went_left);
                    current = if went_left { *left } else { *right };
                }
            }
        }

        Err(ModelError::InvalidModel {
            node_id: current,
            reason: InvalidModelReason::Revisited,
        })
    }
}
