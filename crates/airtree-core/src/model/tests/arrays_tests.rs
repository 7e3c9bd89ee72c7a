use crate::{
    DecisionTree, InvalidModelReason, ModelError, NodeId, TREE_LEAF, TREE_UNDEFINED, TreeArrays,
    extract_rules,
};

use super::two_level_tree;

fn co_arrays() -> TreeArrays {
    TreeArrays {
        feature: vec![0, TREE_UNDEFINED, TREE_UNDEFINED],
        threshold: vec![0.25, -2.0, -2.0],
        children_left: vec![1, TREE_LEAF, TREE_LEAF],
        children_right: vec![2, TREE_LEAF, TREE_LEAF],
        value: vec![vec![10, 10], vec![8, 1], vec![2, 9]],
    }
}

#[test]
fn arrays_convert_to_the_equivalent_typed_tree() {
    let tree = co_arrays().to_tree().expect("convert");
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.leaf_count(), 2);

    let rules = extract_rules(&tree, &["CO (ppm)"], &["Baik", "Sedang"]).expect("extract");
    assert_eq!(rules[0].to_string(), "IF CO (ppm) ≤ 0.25 THEN Baik");
    assert_eq!(rules[1].to_string(), "IF CO (ppm) > 0.25 THEN Sedang");
}

#[test]
fn typed_tree_exports_to_arrays_and_back() {
    let tree = two_level_tree();
    let arrays = TreeArrays::from(&tree);

    assert_eq!(arrays.feature, vec![0, 1, TREE_UNDEFINED, TREE_UNDEFINED, TREE_UNDEFINED]);
    assert_eq!(arrays.children_left, vec![1, 2, TREE_LEAF, TREE_LEAF, TREE_LEAF]);

    let rebuilt = DecisionTree::try_from(&arrays).expect("convert back");
    assert_eq!(rebuilt, tree);
}

#[test]
fn arrays_survive_json() {
    let arrays = co_arrays();
    let json = serde_json::to_string(&arrays).expect("serialize");
    let decoded: TreeArrays = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, arrays);
}

#[test]
fn zero_nodes_is_an_empty_tree() {
    let arrays = TreeArrays {
        feature: vec![],
        threshold: vec![],
        children_left: vec![],
        children_right: vec![],
        value: vec![],
    };
    assert_eq!(arrays.to_tree().expect_err("empty"), ModelError::EmptyTree);
    assert_eq!(
        DecisionTree::from_nodes(Vec::new()).expect_err("empty"),
        ModelError::EmptyTree
    );
}

#[test]
fn mismatched_array_lengths_are_rejected() {
    let mut arrays = co_arrays();
    arrays.threshold.pop();
    assert_eq!(
        arrays.to_tree().expect_err("short threshold array"),
        ModelError::ArrayLengthMismatch {
            field: "threshold",
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn dangling_child_is_rejected() {
    let mut arrays = co_arrays();
    arrays.children_right[0] = 7;
    let err = arrays.to_tree().expect_err("child 7 does not exist");
    assert!(matches!(
        err,
        ModelError::InvalidModel {
            reason: InvalidModelReason::ChildOutOfRange { child: 7, .. },
            ..
        }
    ));
}

#[test]
fn half_leaf_is_rejected() {
    let mut arrays = co_arrays();
    arrays.children_right[0] = TREE_LEAF;
    let err = arrays.to_tree().expect_err("one child only");
    assert_eq!(
        err,
        ModelError::InvalidModel {
            node_id: NodeId::from(0),
            reason: InvalidModelReason::HalfLeaf
        }
    );
}

#[test]
fn cycle_back_to_root_is_rejected() {
    let mut arrays = co_arrays();
    arrays.children_right[0] = 0;
    let err = arrays.to_tree().expect_err("root is its own child");
    assert!(matches!(
        err,
        ModelError::InvalidModel {
            reason: InvalidModelReason::Revisited,
            ..
        }
    ));
}

#[test]
fn orphan_node_is_rejected() {
    let mut arrays = co_arrays();
    arrays.feature.push(TREE_UNDEFINED);
    arrays.threshold.push(-2.0);
    arrays.children_left.push(TREE_LEAF);
    arrays.children_right.push(TREE_LEAF);
    arrays.value.push(vec![1, 1]);

    let err = arrays.to_tree().expect_err("node 3 has no parent");
    assert_eq!(
        err,
        ModelError::InvalidModel {
            node_id: NodeId::from(3),
            reason: InvalidModelReason::Unreachable
        }
    );
}

#[test]
fn non_finite_threshold_is_rejected() {
    let mut arrays = co_arrays();
    arrays.threshold[0] = f64::INFINITY;
    let err = arrays.to_tree().expect_err("infinite threshold");
    assert!(matches!(
        err,
        ModelError::InvalidModel {
            reason: InvalidModelReason::NonFiniteThreshold { .. },
            ..
        }
    ));
}
