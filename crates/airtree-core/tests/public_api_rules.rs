use airtree_core::{
    DecisionTree, FeatureId, ModelError, Node, NodeId, Operator, TREE_LEAF, TREE_UNDEFINED,
    TreeArrays, extract_rules,
};

#[test]
fn public_co_example_end_to_end() {
    let arrays = TreeArrays {
        feature: vec![0, TREE_UNDEFINED, TREE_UNDEFINED],
        threshold: vec![0.25, -2.0, -2.0],
        children_left: vec![1, TREE_LEAF, TREE_LEAF],
        children_right: vec![2, TREE_LEAF, TREE_LEAF],
        value: vec![vec![10, 10], vec![8, 1], vec![2, 9]],
    };
    let tree = arrays.to_tree().expect("valid arrays");

    let features = vec!["CO (ppm)".to_string()];
    let classes = vec!["Baik".to_string(), "Sedang".to_string()];
    let rules = extract_rules(&tree, &features, &classes).expect("extract");

    let summary: Vec<(Vec<String>, &str)> = rules
        .iter()
        .map(|rule| {
            (
                rule.conditions.iter().map(ToString::to_string).collect(),
                rule.predicted_class.as_str(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (vec!["CO (ppm) ≤ 0.25".to_string()], "Baik"),
            (vec!["CO (ppm) > 0.25".to_string()], "Sedang"),
        ]
    );

    assert_eq!(tree.predict(&[0.1], &classes).expect("predict"), "Baik");
    assert_eq!(tree.predict(&[0.9], &classes).expect("predict"), "Sedang");
}

#[test]
fn public_invalid_feature_reference_aborts_extraction() {
    let tree = DecisionTree::from_nodes(vec![
        Node::internal(FeatureId::from(0), 0.5, NodeId::from(1), NodeId::from(2), vec![2, 2]),
        Node::internal(FeatureId::from(4), 0.5, NodeId::from(3), NodeId::from(4), vec![2, 0]),
        Node::leaf(vec![0, 2]),
        Node::leaf(vec![1, 0]),
        Node::leaf(vec![1, 0]),
    ])
    .expect("structurally valid");

    let err = extract_rules(&tree, &["a", "b", "c"], &["Baik", "Sedang"])
        .expect_err("feature 4 is unnamed");
    assert!(matches!(err, ModelError::InvalidModel { .. }));
    assert!(err.to_string().contains("feature index 4"));
}

#[test]
fn public_rule_conditions_report_operators() {
    let tree = DecisionTree::from_nodes(vec![
        Node::internal(FeatureId::from(1), 30.0, NodeId::from(1), NodeId::from(2), vec![3, 3]),
        Node::leaf(vec![3, 0]),
        Node::leaf(vec![0, 3]),
    ])
    .expect("valid");

    let rules = extract_rules(&tree, &["CO (ppm)", "Suhu (°C)"], &["Baik", "Sedang"])
        .expect("extract");
    assert_eq!(rules[0].conditions[0].operator.phrase(), "is less than or equal to");
    assert_eq!(rules[1].conditions[0].operator, Operator::Greater);
    assert_eq!(rules[1].conditions[0].feature_name, "Suhu (°C)");
}
