use serde::{Deserialize, Serialize};

/// A wrapper for an integer index used to address nodes of a tree
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the node array.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    /// Allow for explicit conversion from usize to NodeId
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

/// Column index of a feature in a sample and in the feature-name table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(usize);

impl FeatureId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for FeatureId {
    fn from(value: usize) -> Self {
        FeatureId(value)
    }
}
