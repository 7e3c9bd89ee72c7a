use proptest::prelude::*;

use crate::extract_rules;

use super::tree_from_bytes;

const FEATURES: [&str; 3] = ["CO (ppm)", "PM10 (µg/m3)", "NO2 (ppb)"];
const CLASSES: [&str; 3] = ["Baik", "Sedang", "Tidak Sehat"];

/// A sample satisfying every condition of a rule, if the bounds allow one.
fn witness(conditions: &[crate::Condition]) -> Vec<f64> {
    let mut lower = [f64::NEG_INFINITY; FEATURES.len()];
    let mut upper = [f64::INFINITY; FEATURES.len()];
    for condition in conditions {
        let f = condition.feature.index();
        match condition.operator {
            crate::Operator::LessOrEqual => upper[f] = upper[f].min(condition.threshold),
            crate::Operator::Greater => lower[f] = lower[f].max(condition.threshold),
        }
    }
    (0..FEATURES.len())
        .map(|f| {
            if upper[f].is_finite() {
                upper[f]
            } else if lower[f].is_finite() {
                lower[f] + 1.0
            } else {
                0.0
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn one_rule_per_leaf_with_leaf_depth_conditions(
        bytes in proptest::collection::vec(any::<u8>(), 1..96),
        max_depth in 0usize..8,
    ) {
        let tree = tree_from_bytes(&bytes, FEATURES.len(), CLASSES.len(), max_depth);
        let rules = extract_rules(&tree, &FEATURES, &CLASSES).expect("extract");

        let leaves = tree.nodes().filter(|node| node.is_leaf()).count();
        prop_assert_eq!(rules.len(), leaves);

        for rule in &rules {
            prop_assert!(tree.node(rule.leaf).expect("leaf exists").is_leaf());
            prop_assert_eq!(Some(rule.depth()), tree.depth_of(rule.leaf));
        }

        // pre-order numbering means pre-order leaf enumeration is increasing
        prop_assert!(rules.windows(2).all(|pair| pair[0].leaf < pair[1].leaf));
    }

    #[test]
    fn extraction_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 1..96),
    ) {
        let tree = tree_from_bytes(&bytes, FEATURES.len(), CLASSES.len(), 6);
        let first = extract_rules(&tree, &FEATURES, &CLASSES).expect("extract");
        let second = extract_rules(&tree, &FEATURES, &CLASSES).expect("extract");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn satisfying_a_rule_lands_on_its_leaf(
        bytes in proptest::collection::vec(any::<u8>(), 1..96),
    ) {
        let tree = tree_from_bytes(&bytes, FEATURES.len(), CLASSES.len(), 6);
        let rules = extract_rules(&tree, &FEATURES, &CLASSES).expect("extract");

        for rule in &rules {
            let sample = witness(&rule.conditions);
            // contradictory paths (same feature, crossing bounds) have no witness
            if !rule.matches(&sample) {
                continue;
            }
            prop_assert_eq!(tree.predict_leaf(&sample).expect("predict"), rule.leaf);
            prop_assert_eq!(
                tree.predict(&sample, &CLASSES).expect("predict"),
                rule.predicted_class.clone()
            );
        }
    }
}
