use crate::model::ids::{FeatureId, NodeId};

/// One node of a trained tree.
///
/// Every node keeps the class counts of the training rows that reached it,
/// so internal nodes can still be inspected (and weighted) on their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        class_distribution: Vec<u64>,
    },
    Internal {
        feature: FeatureId,
        threshold: f64,
        left: NodeId,
        right: NodeId,
        class_distribution: Vec<u64>,
    },
}

impl Node {
    /// Create a terminal node
    pub fn leaf(class_distribution: Vec<u64>) -> Self {
        Node::Leaf { class_distribution }
    }

    /// Create a split node; rows with `sample[feature] <= threshold` go `left`.
    pub fn internal(
        feature: FeatureId,
        threshold: f64,
        left: NodeId,
        right: NodeId,
        class_distribution: Vec<u64>,
    ) -> Self {
        Node::Internal {
            feature,
            threshold,
            left,
            right,
            class_distribution,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Class counts of the rows that reached this node.
    pub fn class_distribution(&self) -> &[u64] {
        match self {
            Node::Leaf { class_distribution } | Node::Internal { class_distribution, .. } => {
                class_distribution
            }
        }
    }

    /// Left and right child, `None` for a leaf.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((*left, *right)),
        }
    }

    /// Split feature and threshold, `None` for a leaf.
    pub fn split(&self) -> Option<(FeatureId, f64)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal {
                feature, threshold, ..
            } => Some((*feature, *threshold)),
        }
    }

    /// Total number of rows that reached this node.
    pub fn sample_count(&self) -> u64 {
        self.class_distribution().iter().sum()
    }

    /// Index of the majority class; ties go to the lowest index.
    pub fn majority_class(&self) -> Option<usize> {
        argmax(self.class_distribution())
    }
}

/// First index attaining the maximum, `None` for an empty slice.
pub(crate) fn argmax(counts: &[u64]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, &count) in counts.iter().enumerate() {
        // strict comparison keeps the earliest index on ties
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((i, count));
        }
    }
    best.map(|(i, _)| i)
}
