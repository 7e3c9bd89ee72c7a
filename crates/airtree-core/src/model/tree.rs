use crate::model::{
    arena::Arena,
    error::{InvalidModelReason, ModelError},
    ids::NodeId,
    node::Node,
};

#[derive(Debug, Clone, PartialEq)]
/// An immutable, structurally validated decision tree.
/// The root is always at index 0 and every other node hangs off exactly one parent.
pub struct DecisionTree {
    arena: Arena<Node>,
    depths: Vec<usize>,
    class_count: usize,
}

impl DecisionTree {
    /// Build a tree from an ordered node list, `nodes[0]` being the root.
    ///
    /// Rejects empty input, dangling or shared child references, unreachable
    /// nodes, non-finite thresholds and inconsistent class-distribution lengths.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::EmptyTree);
        }
        let node_count = nodes.len();
        let class_count = nodes[0].class_distribution().len();

        let mut depths: Vec<Option<usize>> = vec![None; node_count];
        let mut stack = vec![(NodeId::from(0), 0usize)];

        while let Some((node_id, depth)) = stack.pop() {
            let invalid = |reason| ModelError::InvalidModel { node_id, reason };

            let slot = &mut depths[node_id.index()];
            if slot.is_some() {
                return Err(invalid(InvalidModelReason::Revisited));
            }
            *slot = Some(depth);

            let node = &nodes[node_id.index()];
            let distribution = node.class_distribution();
            if distribution.is_empty() {
                return Err(invalid(InvalidModelReason::EmptyDistribution));
            }
            if distribution.len() != class_count {
                return Err(invalid(InvalidModelReason::ClassCountMismatch {
                    expected: class_count,
                    found: distribution.len(),
                }));
            }

            if let Node::Internal {
                threshold,
                left,
                right,
                ..
            } = node
            {
                if !threshold.is_finite() {
                    return Err(invalid(InvalidModelReason::NonFiniteThreshold {
                        threshold: *threshold,
                    }));
                }
                for child in [*left, *right] {
                    if child.index() >= node_count {
                        return Err(invalid(InvalidModelReason::ChildOutOfRange {
                            child: child.index() as i64,
                            node_count,
                        }));
                    }
                }
                // right first so the left subtree is walked first
                stack.push((*right, depth + 1));
                stack.push((*left, depth + 1));
            }
        }

        let mut resolved = Vec::with_capacity(node_count);
        for (i, depth) in depths.into_iter().enumerate() {
            match depth {
                Some(depth) => resolved.push(depth),
                None => {
                    return Err(ModelError::InvalidModel {
                        node_id: NodeId::from(i),
                        reason: InvalidModelReason::Unreachable,
                    });
                }
            }
        }

        Ok(DecisionTree {
            arena: Arena::from(nodes),
            depths: resolved,
            class_count,
        })
    }

    /// A tree made of a root leaf only.
    pub fn single_leaf(class_distribution: Vec<u64>) -> Result<Self, ModelError> {
        Self::from_nodes(vec![Node::leaf(class_distribution)])
    }

    /// Check the tree against the name tables it will be rendered with.
    pub fn validate_names(&self, feature_count: usize, class_count: usize) -> Result<(), ModelError> {
        for (i, node) in self.arena.iter().enumerate() {
            let node_id = NodeId::from(i);
            if let Some((feature, _)) = node.split() {
                if feature.index() >= feature_count {
                    return Err(ModelError::InvalidModel {
                        node_id,
                        reason: InvalidModelReason::FeatureOutOfRange {
                            feature,
                            feature_count,
                        },
                    });
                }
            }
            let found = node.class_distribution().len();
            if found != class_count {
                return Err(ModelError::InvalidModel {
                    node_id,
                    reason: InvalidModelReason::ClassCountMismatch {
                        expected: class_count,
                        found,
                    },
                });
            }
        }
        Ok(())
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::from(0)
    }

    /// Return how many nodes exist in the tree arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of terminal nodes.
    pub fn leaf_count(&self) -> usize {
        self.arena.iter().filter(|node| node.is_leaf()).count()
    }

    /// Length of the per-node class distributions.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Return a node handle.
    pub fn node(&self, node_id: NodeId) -> Result<&Node, ModelError> {
        self.arena.get(node_id).ok_or(ModelError::InvalidModel {
            node_id,
            reason: InvalidModelReason::ChildOutOfRange {
                child: node_id.index() as i64,
                node_count: self.arena.len(),
            },
        })
    }

    /// Iterate nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.arena.iter()
    }

    /// Distance from the root, the root being at depth 0.
    pub fn depth_of(&self, node_id: NodeId) -> Option<usize> {
        self.depths.get(node_id.index()).copied()
    }

    /// Depth of the deepest leaf.
    pub fn max_depth(&self) -> usize {
        self.depths.iter().copied().max().unwrap_or(0)
    }
}
