use crate::{DecisionTree, FeatureId, Node, NodeId};

mod arrays_tests;
mod property_rules_tests;

/// Root splits on `CO (ppm)` at 0.25 with two leaves.
pub(crate) fn co_tree() -> DecisionTree {
    DecisionTree::from_nodes(vec![
        Node::internal(
            FeatureId::from(0),
            0.25,
            NodeId::from(1),
            NodeId::from(2),
            vec![10, 10],
        ),
        Node::leaf(vec![8, 1]),
        Node::leaf(vec![2, 9]),
    ])
    .expect("valid tree")
}

/// Depth-2 tree over two features and three classes.
///
/// ```text
///            0: f0 <= 0.5
///           /            \
///   1: f1 <= 0.3       4: leaf [0, 1, 7]
///    /        \
/// 2: [6,1,0] 3: [1,5,0]
/// ```
pub(crate) fn two_level_tree() -> DecisionTree {
    DecisionTree::from_nodes(vec![
        Node::internal(
            FeatureId::from(0),
            0.5,
            NodeId::from(1),
            NodeId::from(4),
            vec![7, 7, 7],
        ),
        Node::internal(
            FeatureId::from(1),
            0.3,
            NodeId::from(2),
            NodeId::from(3),
            vec![7, 6, 0],
        ),
        Node::leaf(vec![6, 1, 0]),
        Node::leaf(vec![1, 5, 0]),
        Node::leaf(vec![0, 1, 7]),
    ])
    .expect("valid tree")
}

/// Build a pre-order numbered tree by consuming `bytes` cyclically.
pub(crate) fn tree_from_bytes(
    bytes: &[u8],
    feature_count: usize,
    class_count: usize,
    max_depth: usize,
) -> DecisionTree {
    let mut nodes = Vec::new();
    let mut cursor = 0usize;
    grow(
        &mut nodes,
        bytes,
        &mut cursor,
        (feature_count, class_count),
        0,
        max_depth,
    );
    DecisionTree::from_nodes(nodes).expect("generated tree is well formed")
}

fn grow(
    nodes: &mut Vec<Node>,
    bytes: &[u8],
    cursor: &mut usize,
    (feature_count, class_count): (usize, usize),
    depth: usize,
    max_depth: usize,
) -> NodeId {
    let mut next = || {
        let byte = bytes[*cursor % bytes.len()];
        *cursor += 1;
        byte
    };

    let id = NodeId::from(nodes.len());
    let shape = next();
    let distribution: Vec<u64> = (0..class_count).map(|_| u64::from(next() % 10)).collect();

    if depth >= max_depth || shape % 3 == 0 {
        nodes.push(Node::leaf(distribution));
        return id;
    }

    let feature = FeatureId::from(next() as usize % feature_count);
    let threshold = f64::from(next()) / 16.0;

    nodes.push(Node::leaf(distribution.clone()));
    let dims = (feature_count, class_count);
    let left = grow(nodes, bytes, cursor, dims, depth + 1, max_depth);
    let right = grow(nodes, bytes, cursor, dims, depth + 1, max_depth);
    nodes[id.index()] = Node::internal(feature, threshold, left, right, distribution);
    id
}
