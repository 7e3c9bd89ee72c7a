use airtree_core::{DecisionTree, ModelError, Node};

use crate::trainer::entropy;

/// Share of the total entropy decrease contributed by each feature.
///
/// Each split adds `n·H(node) - n_left·H(left) - n_right·H(right)` to its
/// feature; the result sums to 1, or is all zeros for a tree without splits.
pub fn feature_importances(
    tree: &DecisionTree,
    feature_count: usize,
) -> Result<Vec<f64>, ModelError> {
    tree.validate_names(feature_count, tree.class_count())?;

    let mut importances = vec![0.0; feature_count];
    for node in tree.nodes() {
        let Node::Internal {
            feature,
            left,
            right,
            class_distribution,
            ..
        } = node
        else {
            continue;
        };
        let left = tree.node(*left)?;
        let right = tree.node(*right)?;

        let weighted = |node: &Node| node.sample_count() as f64 * entropy(node.class_distribution());
        let decrease = node.sample_count() as f64 * entropy(class_distribution)
            - weighted(left)
            - weighted(right);
        importances[feature.index()] += decrease.max(0.0);
    }

    let total: f64 = importances.iter().sum();
    if total > 0.0 {
        for importance in &mut importances {
            *importance /= total;
        }
    }
    Ok(importances)
}

#[cfg(test)]
mod tests {
    use airtree_core::{FeatureId, NodeId};

    use super::*;

    #[test]
    fn only_split_features_gain_importance() {
        let tree = DecisionTree::from_nodes(vec![
            Node::internal(FeatureId::from(2), 0.5, NodeId::from(1), NodeId::from(2), vec![4, 4]),
            Node::leaf(vec![4, 0]),
            Node::leaf(vec![0, 4]),
        ])
        .expect("valid");

        let importances = feature_importances(&tree, 3).expect("importances");
        assert_eq!(importances, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn importances_sum_to_one_across_several_splits() {
        let tree = DecisionTree::from_nodes(vec![
            Node::internal(FeatureId::from(0), 0.5, NodeId::from(1), NodeId::from(4), vec![4, 4]),
            Node::internal(FeatureId::from(1), 0.5, NodeId::from(2), NodeId::from(3), vec![4, 1]),
            Node::leaf(vec![4, 0]),
            Node::leaf(vec![0, 1]),
            Node::leaf(vec![0, 3]),
        ])
        .expect("valid");

        let importances = feature_importances(&tree, 2).expect("importances");
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(importances[0] > importances[1]);
    }

    #[test]
    fn single_leaf_has_no_importance() {
        let tree = DecisionTree::single_leaf(vec![3, 1]).expect("leaf");
        assert_eq!(feature_importances(&tree, 2).expect("importances"), vec![0.0, 0.0]);
    }
}
