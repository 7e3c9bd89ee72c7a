use serde::Serialize;

use crate::LearnError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Precision, recall and F1 for one class (or an average over classes).
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Held-out evaluation of a classifier.
pub struct Evaluation {
    pub accuracy: f64,
    /// `confusion[actual][predicted]`
    pub confusion: Vec<Vec<usize>>,
    pub per_class: Vec<ClassMetrics>,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl Evaluation {
    /// Score predictions against ground truth; undefined ratios count as 0.
    pub fn compute(
        y_true: &[usize],
        y_pred: &[usize],
        class_count: usize,
    ) -> Result<Self, LearnError> {
        if y_true.is_empty() {
            return Err(LearnError::EmptyDataset);
        }
        if y_true.len() != y_pred.len() {
            return Err(LearnError::SchemaMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }

        let mut confusion = vec![vec![0usize; class_count]; class_count];
        for (&actual, &predicted) in y_true.iter().zip(y_pred) {
            for label in [actual, predicted] {
                if label >= class_count {
                    return Err(LearnError::LabelOutOfRange { label, class_count });
                }
            }
            confusion[actual][predicted] += 1;
        }

        let correct: usize = (0..class_count).map(|c| confusion[c][c]).sum();
        let accuracy = correct as f64 / y_true.len() as f64;

        let per_class: Vec<ClassMetrics> = (0..class_count)
            .map(|c| {
                let true_positive = confusion[c][c] as f64;
                let predicted: usize = confusion.iter().map(|row| row[c]).sum();
                let support: usize = confusion[c].iter().sum();
                let precision = ratio(true_positive, predicted as f64);
                let recall = ratio(true_positive, support as f64);
                ClassMetrics {
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support,
                }
            })
            .collect();

        let total = y_true.len();
        let macro_avg = average(&per_class, |_| 1.0 / class_count as f64, total);
        let weighted_avg = average(&per_class, |m| m.support as f64 / total as f64, total);

        Ok(Evaluation {
            accuracy,
            confusion,
            per_class,
            macro_avg,
            weighted_avg,
        })
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}

fn average<W>(per_class: &[ClassMetrics], weight: W, support: usize) -> ClassMetrics
where
    W: Fn(&ClassMetrics) -> f64,
{
    let sum = |field: fn(&ClassMetrics) -> f64| {
        per_class.iter().map(|m| weight(m) * field(m)).sum::<f64>()
    };
    ClassMetrics {
        precision: sum(|m| m.precision),
        recall: sum(|m| m.recall),
        f1: sum(|m| m.f1),
        support,
    }
}
