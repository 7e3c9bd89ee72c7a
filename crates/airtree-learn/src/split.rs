use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::{LearnError, TrainConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Row indices of the training and evaluation halves, each in ascending order.
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle rows with the configured seed and hold out `test_fraction` of them.
///
/// With `stratify` on, every class contributes its own share of test rows and
/// keeps at least one training row. Stratification needs two rows per class;
/// otherwise the split falls back to a plain shuffled cut.
pub fn train_test_split(
    labels: &[usize],
    class_count: usize,
    config: &TrainConfig,
) -> Result<Split, LearnError> {
    let rows = labels.len();
    if rows < 2 {
        return Err(LearnError::TooFewRows { rows });
    }
    if let Some(&label) = labels.iter().find(|&&label| label >= class_count) {
        return Err(LearnError::LabelOutOfRange { label, class_count });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); class_count];
    for (row, &label) in labels.iter().enumerate() {
        groups[label].push(row);
    }
    groups.retain(|group| !group.is_empty());

    let stratified = config.stratify && groups.iter().all(|group| group.len() >= 2);
    if config.stratify && !stratified {
        warn!("a class has fewer than two rows, falling back to an unstratified split");
    }

    let (mut train, mut test) = if stratified {
        let mut quotas: Vec<usize> = groups
            .iter()
            .map(|group| share(group.len(), config.test_fraction).min(group.len() - 1))
            .collect();
        if quotas.iter().all(|&quota| quota == 0) {
            // every class rounded down to nothing; take one row from the largest class
            let largest = (0..groups.len())
                .max_by_key(|&i| (groups[i].len(), usize::MAX - i))
                .unwrap_or(0);
            quotas[largest] = 1;
        }

        let mut train = Vec::new();
        let mut test = Vec::new();
        for (group, quota) in groups.iter_mut().zip(quotas) {
            group.shuffle(&mut rng);
            test.extend_from_slice(&group[..quota]);
            train.extend_from_slice(&group[quota..]);
        }
        (train, test)
    } else {
        let mut order: Vec<usize> = (0..rows).collect();
        order.shuffle(&mut rng);
        let cut = share(rows, config.test_fraction).clamp(1, rows - 1);
        let train = order.split_off(cut);
        (train, order)
    };

    train.sort_unstable();
    test.sort_unstable();
    debug!(
        train = train.len(),
        test = test.len(),
        stratified,
        "split rows"
    );

    Ok(Split { train, test })
}

fn share(count: usize, fraction: f64) -> usize {
    (count as f64 * fraction).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(test_fraction: f64, stratify: bool) -> TrainConfig {
        TrainConfig {
            test_fraction,
            stratify,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn stratified_split_keeps_class_proportions() {
        let labels: Vec<usize> = (0..30).map(|i| i % 3).collect();
        let split = train_test_split(&labels, 3, &config(0.2, true)).expect("split");

        assert_eq!(split.test.len(), 6);
        assert_eq!(split.train.len(), 24);
        for class in 0..3 {
            let in_test = split.test.iter().filter(|&&row| labels[row] == class).count();
            assert_eq!(in_test, 2, "class {class}");
        }
    }

    #[test]
    fn halves_partition_all_rows() {
        let labels: Vec<usize> = (0..17).map(|i| usize::from(i % 5 == 0)).collect();
        let split = train_test_split(&labels, 2, &config(0.3, true)).expect("split");

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let labels: Vec<usize> = (0..40).map(|i| i % 4).collect();
        let a = train_test_split(&labels, 4, &config(0.25, true)).expect("split");
        let b = train_test_split(&labels, 4, &config(0.25, true)).expect("split");
        assert_eq!(a, b);

        let other_seed = TrainConfig {
            seed: 7,
            ..config(0.25, true)
        };
        let c = train_test_split(&labels, 4, &other_seed).expect("split");
        assert_eq!(c.test.len(), a.test.len());
    }

    #[test]
    fn tiny_classes_fall_back_to_plain_split() {
        let labels = vec![0, 0, 0, 1];
        let split = train_test_split(&labels, 2, &config(0.25, true)).expect("split");
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 3);
    }

    #[test]
    fn test_half_is_never_empty() {
        let labels = vec![0, 0, 1, 1];
        let split = train_test_split(&labels, 2, &config(0.1, true)).expect("split");
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 3);
    }

    #[test]
    fn single_row_cannot_be_split() {
        assert!(matches!(
            train_test_split(&[0], 1, &TrainConfig::default()),
            Err(LearnError::TooFewRows { rows: 1 })
        ));
    }
}
