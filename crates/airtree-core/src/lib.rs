mod model;

pub use model::arrays::{TREE_LEAF, TREE_UNDEFINED, TreeArrays};
pub use model::error::{InvalidModelReason, ModelError};
pub use model::ids::{FeatureId, NodeId};
pub use model::node::Node;
pub use model::rules::{Condition, DecisionRule, Operator, extract_rules};
pub use model::tree::DecisionTree;
