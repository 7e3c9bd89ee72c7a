use serde::{Deserialize, Serialize};

use crate::model::{
    error::{InvalidModelReason, ModelError},
    ids::{FeatureId, NodeId},
    node::Node,
    tree::DecisionTree,
};

/// Child reference marking "no child".
pub const TREE_LEAF: i64 = -1;
/// Feature (and threshold) placeholder stored on leaves.
pub const TREE_UNDEFINED: i64 = -2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Parallel-array layout of a trained tree, one entry per node.
///
/// This is the interchange form a trainer hands over and the form stored in
/// model files; it is converted into a [`DecisionTree`] before use.
pub struct TreeArrays {
    /// Split feature per node, `TREE_UNDEFINED` on leaves.
    pub feature: Vec<i64>,
    /// Split threshold per node, `TREE_UNDEFINED as f64` on leaves.
    pub threshold: Vec<f64>,
    /// Left child per node, `TREE_LEAF` on leaves.
    pub children_left: Vec<i64>,
    /// Right child per node, `TREE_LEAF` on leaves.
    pub children_right: Vec<i64>,
    /// Class counts per node.
    pub value: Vec<Vec<u64>>,
}

impl TreeArrays {
    /// Number of nodes described by the arrays.
    pub fn node_count(&self) -> usize {
        self.feature.len()
    }

    /// Convert into a validated typed tree.
    pub fn to_tree(&self) -> Result<DecisionTree, ModelError> {
        let node_count = self.node_count();
        if node_count == 0 {
            return Err(ModelError::EmptyTree);
        }

        for (field, found) in [
            ("threshold", self.threshold.len()),
            ("children_left", self.children_left.len()),
            ("children_right", self.children_right.len()),
            ("value", self.value.len()),
        ] {
            if found != node_count {
                return Err(ModelError::ArrayLengthMismatch {
                    field,
                    expected: node_count,
                    found,
                });
            }
        }

        let mut nodes = Vec::with_capacity(node_count);
        for i in 0..node_count {
            let node_id = NodeId::from(i);
            let invalid = |reason| ModelError::InvalidModel { node_id, reason };
            let class_distribution = self.value[i].clone();

            let node = match (self.children_left[i], self.children_right[i]) {
                (TREE_LEAF, TREE_LEAF) => Node::leaf(class_distribution),
                (TREE_LEAF, _) | (_, TREE_LEAF) => return Err(invalid(InvalidModelReason::HalfLeaf)),
                (left, right) => {
                    for child in [left, right] {
                        if child < 0 || child as usize >= node_count {
                            return Err(invalid(InvalidModelReason::ChildOutOfRange {
                                child,
                                node_count,
                            }));
                        }
                    }
                    let feature = self.feature[i];
                    if feature < 0 {
                        return Err(invalid(InvalidModelReason::UndefinedFeature { feature }));
                    }
                    Node::internal(
                        FeatureId::from(feature as usize),
                        self.threshold[i],
                        NodeId::from(left as usize),
                        NodeId::from(right as usize),
                        class_distribution,
                    )
                }
            };
            nodes.push(node);
        }

        DecisionTree::from_nodes(nodes)
    }
}

impl From<&DecisionTree> for TreeArrays {
    fn from(tree: &DecisionTree) -> Self {
        let node_count = tree.node_count();
        let mut arrays = TreeArrays {
            feature: Vec::with_capacity(node_count),
            threshold: Vec::with_capacity(node_count),
            children_left: Vec::with_capacity(node_count),
            children_right: Vec::with_capacity(node_count),
            value: Vec::with_capacity(node_count),
        };

        for node in tree.nodes() {
            match node {
                Node::Leaf { .. } => {
                    arrays.feature.push(TREE_UNDEFINED);
                    arrays.threshold.push(TREE_UNDEFINED as f64);
                    arrays.children_left.push(TREE_LEAF);
                    arrays.children_right.push(TREE_LEAF);
                }
                Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    arrays.feature.push(feature.index() as i64);
                    arrays.threshold.push(*threshold);
                    arrays.children_left.push(left.index() as i64);
                    arrays.children_right.push(right.index() as i64);
                }
            }
            arrays.value.push(node.class_distribution().to_vec());
        }

        arrays
    }
}

impl TryFrom<&TreeArrays> for DecisionTree {
    type Error = ModelError;

    fn try_from(arrays: &TreeArrays) -> Result<Self, Self::Error> {
        arrays.to_tree()
    }
}
