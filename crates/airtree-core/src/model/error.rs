use std::fmt;

use crate::model::ids::{FeatureId, NodeId};

/// Error type for tree construction, validation, rule extraction and inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The tree has no nodes at all.
    EmptyTree,
    /// The tree references something that does not exist or breaks the tree shape.
    InvalidModel {
        node_id: NodeId,
        reason: InvalidModelReason,
    },
    /// One of the parallel arrays of a `TreeArrays` has the wrong length.
    ArrayLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A sample is too short for a feature the tree splits on.
    SampleTooShort {
        feature: FeatureId,
        sample_len: usize,
    },
}

/// Structural reason a node was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidModelReason {
    /// Split feature index is not covered by the feature-name table.
    FeatureOutOfRange { feature: FeatureId, feature_count: usize },
    /// Class distribution length differs from the class-name table.
    ClassCountMismatch { expected: usize, found: usize },
    /// Child reference points outside the node array.
    ChildOutOfRange { child: i64, node_count: usize },
    /// Exactly one of the two child references is present.
    HalfLeaf,
    /// Node is reachable along more than one path (shared child or cycle).
    Revisited,
    /// Node cannot be reached from the root.
    Unreachable,
    /// Split threshold is NaN or infinite.
    NonFiniteThreshold { threshold: f64 },
    /// Node carries no class counts.
    EmptyDistribution,
    /// Split feature is negative but the node has children.
    UndefinedFeature { feature: i64 },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyTree => write!(f, "tree has no nodes"),
            ModelError::InvalidModel { node_id, reason } => {
                write!(f, "invalid model at node {}: {reason}", node_id.index())
            }
            ModelError::ArrayLengthMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "tree array '{field}' has {found} entries, expected {expected}"
            ),
            ModelError::SampleTooShort {
                feature,
                sample_len,
            } => write!(
                f,
                "sample has {sample_len} values but the tree splits on feature {}",
                feature.index()
            ),
        }
    }
}

impl fmt::Display for InvalidModelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidModelReason::FeatureOutOfRange {
                feature,
                feature_count,
            } => write!(
                f,
                "feature index {} out of range for {feature_count} feature names",
                feature.index()
            ),
            InvalidModelReason::ClassCountMismatch { expected, found } => write!(
                f,
                "class distribution has {found} entries, expected {expected}"
            ),
            InvalidModelReason::ChildOutOfRange { child, node_count } => write!(
                f,
                "child reference {child} out of range for {node_count} nodes"
            ),
            InvalidModelReason::HalfLeaf => write!(f, "node has exactly one child"),
            InvalidModelReason::Revisited => write!(f, "node reachable along more than one path"),
            InvalidModelReason::Unreachable => write!(f, "node is not reachable from the root"),
            InvalidModelReason::NonFiniteThreshold { threshold } => {
                write!(f, "split threshold {threshold} is not finite")
            }
            InvalidModelReason::EmptyDistribution => write!(f, "class distribution is empty"),
            InvalidModelReason::UndefinedFeature { feature } => {
                write!(f, "split node has undefined feature {feature}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
