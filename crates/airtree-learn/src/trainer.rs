use airtree_core::{DecisionTree, FeatureId, Node, NodeId};
use tracing::debug;

use crate::{LearnError, TrainConfig};

/// Smallest information gain treated as an improvement.
const MIN_GAIN: f64 = 1e-12;

/// A node whose children are only known once their subtrees have been numbered.
struct Draft {
    distribution: Vec<u64>,
    split: Option<(FeatureId, f64)>,
    left: NodeId,
    right: NodeId,
}

enum Branch {
    Left,
    Right,
}

struct Task {
    rows: Vec<usize>,
    depth: usize,
    parent: Option<(usize, Branch)>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Grow a classification tree with the entropy criterion (information gain).
///
/// Thresholds sit halfway between consecutive distinct values; on equal gain
/// the lower feature index and then the lower threshold win. Nodes are numbered
/// in pre-order: a node, its whole left subtree, then its right subtree.
pub fn train_tree(
    features: &[Vec<f64>],
    labels: &[usize],
    class_count: usize,
    config: &TrainConfig,
) -> Result<DecisionTree, LearnError> {
    config.validate()?;
    let width = features.first().ok_or(LearnError::EmptyDataset)?.len();
    if labels.len() != features.len() {
        return Err(LearnError::SchemaMismatch {
            expected: features.len(),
            found: labels.len(),
        });
    }
    if let Some(row) = features.iter().find(|row| row.len() != width) {
        return Err(LearnError::SchemaMismatch {
            expected: width,
            found: row.len(),
        });
    }
    if let Some(&label) = labels.iter().find(|&&label| label >= class_count) {
        return Err(LearnError::LabelOutOfRange { label, class_count });
    }

    let mut drafts: Vec<Draft> = Vec::new();
    let mut stack = vec![Task {
        rows: (0..features.len()).collect(),
        depth: 0,
        parent: None,
    }];

    while let Some(task) = stack.pop() {
        let id = drafts.len();
        if let Some((parent, branch)) = &task.parent {
            match branch {
                Branch::Left => drafts[*parent].left = NodeId::from(id),
                Branch::Right => drafts[*parent].right = NodeId::from(id),
            }
        }

        let distribution = class_distribution(&task.rows, labels, class_count);
        let parent_entropy = entropy(&distribution);
        let splittable = task.depth < config.max_depth
            && task.rows.len() >= config.min_samples_split
            && task.rows.len() / 2 >= config.min_samples_leaf
            && parent_entropy > 0.0;

        let candidate = if splittable {
            best_split(
                features,
                labels,
                &task.rows,
                &distribution,
                config.min_samples_leaf,
            )
        } else {
            None
        };

        let Some(candidate) = candidate else {
            drafts.push(Draft {
                distribution,
                split: None,
                left: NodeId::from(0),
                right: NodeId::from(0),
            });
            continue;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = task
            .rows
            .iter()
            .copied()
            .partition(|&row| features[row][candidate.feature] <= candidate.threshold);

        drafts.push(Draft {
            distribution,
            split: Some((FeatureId::from(candidate.feature), candidate.threshold)),
            left: NodeId::from(0),
            right: NodeId::from(0),
        });
        // left is pushed last so its subtree is numbered first
        stack.push(Task {
            rows: right_rows,
            depth: task.depth + 1,
            parent: Some((id, Branch::Right)),
        });
        stack.push(Task {
            rows: left_rows,
            depth: task.depth + 1,
            parent: Some((id, Branch::Left)),
        });
    }

    let nodes = drafts
        .into_iter()
        .map(|draft| match draft.split {
            Some((feature, threshold)) => Node::internal(
                feature,
                threshold,
                draft.left,
                draft.right,
                draft.distribution,
            ),
            None => Node::leaf(draft.distribution),
        })
        .collect();

    let tree = DecisionTree::from_nodes(nodes)?;
    debug!(
        nodes = tree.node_count(),
        leaves = tree.leaf_count(),
        depth = tree.max_depth(),
        "grew decision tree"
    );
    Ok(tree)
}

fn best_split(
    features: &[Vec<f64>],
    labels: &[usize],
    rows: &[usize],
    distribution: &[u64],
    min_samples_leaf: usize,
) -> Option<Candidate> {
    let n = rows.len();
    let width = features[rows[0]].len();
    let parent_entropy = entropy(distribution);
    let mut order = rows.to_vec();
    let mut best: Option<Candidate> = None;

    for feature in 0..width {
        order.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));

        let mut left = vec![0u64; distribution.len()];
        let mut right = distribution.to_vec();

        for i in 0..n - 1 {
            let row = order[i];
            left[labels[row]] += 1;
            right[labels[row]] -= 1;

            let here = features[row][feature];
            let next = features[order[i + 1]][feature];
            if next <= here {
                continue;
            }

            let n_left = i + 1;
            let n_right = n - n_left;
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }

            let children = (n_left as f64 * entropy(&left) + n_right as f64 * entropy(&right))
                / n as f64;
            let gain = parent_entropy - children;
            if gain <= MIN_GAIN || best.is_some_and(|b| gain <= b.gain + MIN_GAIN) {
                continue;
            }

            let mut threshold = here + (next - here) / 2.0;
            if threshold >= next {
                threshold = here;
            }
            best = Some(Candidate {
                feature,
                threshold,
                gain,
            });
        }
    }

    best
}

fn class_distribution(rows: &[usize], labels: &[usize], class_count: usize) -> Vec<u64> {
    let mut counts = vec![0u64; class_count];
    for &row in rows {
        counts[labels[row]] += 1;
    }
    counts
}

/// Shannon entropy in bits of a class-count vector.
pub(crate) fn entropy(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use airtree_core::{Node, extract_rules};

    use super::*;

    fn config(max_depth: usize) -> TrainConfig {
        TrainConfig {
            max_depth,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn entropy_of_pure_and_even_counts() {
        assert_eq!(entropy(&[4, 0]), 0.0);
        assert!((entropy(&[3, 3]) - 1.0).abs() < 1e-12);
        assert!((entropy(&[1, 1, 1, 1]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn separable_data_splits_at_the_midpoint() {
        let features = vec![vec![0.1], vec![0.2], vec![0.6], vec![0.9]];
        let labels = vec![0, 0, 1, 1];
        let tree = train_tree(&features, &labels, 2, &config(5)).expect("train");

        assert_eq!(tree.node_count(), 3);
        let (feature, threshold) = tree
            .node(tree.root_id())
            .expect("root")
            .split()
            .expect("root splits");
        assert_eq!(feature.index(), 0);
        assert!((threshold - 0.4).abs() < 1e-12);

        for (row, &label) in features.iter().zip(&labels) {
            assert_eq!(tree.predict_class_index(row).expect("predict"), label);
        }
    }

    #[test]
    fn informative_feature_wins_over_noise() {
        // feature 0 is noise, feature 1 separates the classes
        let features = vec![
            vec![0.5, 0.0],
            vec![0.1, 0.1],
            vec![0.9, 0.2],
            vec![0.5, 0.8],
            vec![0.1, 0.9],
            vec![0.9, 1.0],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let tree = train_tree(&features, &labels, 2, &config(3)).expect("train");

        let (feature, _) = tree.node(tree.root_id()).expect("root").split().expect("split");
        assert_eq!(feature.index(), 1);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn depth_limit_is_respected_and_nodes_are_pre_ordered() {
        let features: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64, (i % 4) as f64]).collect();
        let labels: Vec<usize> = (0..16).map(|i| (i / 2) % 3).collect();
        let tree = train_tree(&features, &labels, 3, &config(2)).expect("train");

        assert!(tree.max_depth() <= 2);
        let rules = extract_rules(&tree, &["a", "b"], &["x", "y", "z"]).expect("rules");
        assert!(rules.windows(2).all(|pair| pair[0].leaf < pair[1].leaf));

        // every internal node's left child immediately follows it
        for (i, node) in tree.nodes().enumerate() {
            if let Node::Internal { left, .. } = node {
                assert_eq!(left.index(), i + 1);
            }
        }
    }

    #[test]
    fn training_is_deterministic() {
        let features: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i * 7 % 11) as f64, (i * 3 % 5) as f64])
            .collect();
        let labels: Vec<usize> = (0..20).map(|i| (i * 7 % 11) % 2).collect();
        let a = train_tree(&features, &labels, 2, &config(4)).expect("train");
        let b = train_tree(&features, &labels, 2, &config(4)).expect("train");
        assert_eq!(a, b);
    }

    #[test]
    fn pure_input_gives_a_single_leaf() {
        let features = vec![vec![1.0], vec![2.0]];
        let labels = vec![1, 1];
        let tree = train_tree(&features, &labels, 2, &config(4)).expect("train");
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node(tree.root_id()).expect("root").class_distribution(), [0u64, 2]);
    }

    #[test]
    fn min_samples_leaf_blocks_lopsided_splits() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec![0, 1, 1, 1];
        let strict = TrainConfig {
            min_samples_leaf: 2,
            ..config(4)
        };
        let tree = train_tree(&features, &labels, 2, &strict).expect("train");
        // only the 2/2 split is allowed; its right side is pure
        assert_eq!(tree.leaf_count(), 2);
        let (_, threshold) = tree.node(tree.root_id()).expect("root").split().expect("split");
        assert!((threshold - 1.5).abs() < 1e-12);
    }

    #[test]
    fn label_outside_class_range_is_rejected() {
        let err = train_tree(&[vec![0.0]], &[2], 2, &config(3)).expect_err("label 2");
        assert!(matches!(err, LearnError::LabelOutOfRange { label: 2, class_count: 2 }));
    }
}
