use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{
    error::{InvalidModelReason, ModelError},
    ids::{FeatureId, NodeId},
    node::{Node, argmax},
    tree::DecisionTree,
};

/// Direction of a split test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `value <= threshold`, the left branch.
    LessOrEqual,
    /// `value > threshold`, the right branch.
    Greater,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::LessOrEqual => "≤",
            Operator::Greater => ">",
        }
    }

    /// Long form used when explaining a rule step by step.
    pub fn phrase(&self) -> &'static str {
        match self {
            Operator::LessOrEqual => "is less than or equal to",
            Operator::Greater => "is greater than",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One split test on the way from the root to a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub feature: FeatureId,
    pub feature_name: String,
    pub operator: Operator,
    /// Full precision; only the `Display` form is rounded.
    pub threshold: f64,
}

impl Condition {
    pub fn new(
        feature: FeatureId,
        feature_name: impl Into<String>,
        operator: Operator,
        threshold: f64,
    ) -> Self {
        Condition {
            feature,
            feature_name: feature_name.into(),
            operator,
            threshold,
        }
    }

    /// Evaluate the test the same way inference does.
    /// A sample too short to hold the feature never satisfies it.
    pub fn is_satisfied_by(&self, sample: &[f64]) -> bool {
        let Some(&value) = sample.get(self.feature.index()) else {
            return false;
        };
        let goes_left = value <= self.threshold;
        match self.operator {
            Operator::LessOrEqual => goes_left,
            Operator::Greater => !goes_left,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2}",
            self.feature_name, self.operator, self.threshold
        )
    }
}

/// Root-to-leaf path of split tests together with the class the leaf predicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub leaf: NodeId,
    pub conditions: Vec<Condition>,
    pub class_index: usize,
    pub predicted_class: String,
}

impl DecisionRule {
    /// Whether a sample passes every test of the rule.
    pub fn matches(&self, sample: &[f64]) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_satisfied_by(sample))
    }

    /// Number of tests, equal to the depth of the leaf.
    pub fn depth(&self) -> usize {
        self.conditions.len()
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "ALWAYS {}", self.predicted_class);
        }
        f.write_str("IF ")?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{condition}")?;
        }
        write!(f, " THEN {}", self.predicted_class)
    }
}

/// Enumerate one rule per leaf, in pre-order (left branch before right).
///
/// The whole tree is checked against the name tables before any rule is
/// produced, so the result is either complete or an error.
pub fn extract_rules<F, C>(
    tree: &DecisionTree,
    feature_names: &[F],
    class_names: &[C],
) -> Result<Vec<DecisionRule>, ModelError>
where
    F: AsRef<str>,
    C: AsRef<str>,
{
    tree.validate_names(feature_names.len(), class_names.len())?;

    let node_count = tree.node_count();
    let mut rules = Vec::with_capacity(tree.leaf_count());
    let mut stack: Vec<(NodeId, Vec<Condition>)> = vec![(tree.root_id(), Vec::new())];
    let mut visited = 0usize;

    while let Some((node_id, path)) = stack.pop() {
        visited += 1;
        if visited > node_count {
            return Err(ModelError::InvalidModel {
                node_id,
                reason: InvalidModelReason::Revisited,
            });
        }

        match tree.node(node_id)? {
            Node::Leaf { class_distribution } => {
                let class_index =
                    argmax(class_distribution).ok_or(ModelError::InvalidModel {
                        node_id,
                        reason: InvalidModelReason::EmptyDistribution,
                    })?;
                let predicted_class = class_name(class_names, class_index, node_id)?;
                rules.push(DecisionRule {
                    leaf: node_id,
                    conditions: path,
                    class_index,
                    predicted_class,
                });
            }
            Node::Internal {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                let name = feature_name(feature_names, *feature, node_id)?;

                let mut right_path = path.clone();
                right_path.push(Condition::new(*feature, name, Operator::Greater, *threshold));
                let mut left_path = path;
                left_path.push(Condition::new(*feature, name, Operator::LessOrEqual, *threshold));

                stack.push((*right, right_path));
                stack.push((*left, left_path));
            }
        }
    }

    Ok(rules)
}

pub(crate) fn feature_name<F: AsRef<str>>(
    feature_names: &[F],
    feature: FeatureId,
    node_id: NodeId,
) -> Result<&str, ModelError> {
    feature_names
        .get(feature.index())
        .map(AsRef::as_ref)
        .ok_or(ModelError::InvalidModel {
            node_id,
            reason: InvalidModelReason::FeatureOutOfRange {
                feature,
                feature_count: feature_names.len(),
            },
        })
}

pub(crate) fn class_name<C: AsRef<str>>(
    class_names: &[C],
    class_index: usize,
    node_id: NodeId,
) -> Result<String, ModelError> {
    class_names
        .get(class_index)
        .map(|name| name.as_ref().to_string())
        .ok_or(ModelError::InvalidModel {
            node_id,
            reason: InvalidModelReason::ClassCountMismatch {
                expected: class_names.len(),
                found: class_index + 1,
            },
        })
}
