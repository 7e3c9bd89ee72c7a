//! Plain-text rendering of datasets, reports, rules and predictions.

use std::io::{self, Write};

use airtree_core::DecisionRule;
use airtree_learn::{AirQuality, Dataset, MinMaxScaler, Prediction, TrainingReport};

/// Rules shown after training before the listing is cut short.
pub const RULE_PREVIEW: usize = 10;

pub fn dataset_summary(
    out: &mut impl Write,
    raw: &Dataset,
    scaler: &MinMaxScaler,
) -> io::Result<()> {
    writeln!(
        out,
        "{} rows, {} features",
        raw.len(),
        raw.feature_names().len()
    )?;
    writeln!(out)?;
    writeln!(out, "{:<24} {:>12} {:>12}", "feature", "min", "max")?;
    for ((name, min), max) in raw
        .feature_names()
        .iter()
        .zip(scaler.data_min())
        .zip(scaler.data_max())
    {
        writeln!(out, "{name:<24} {min:>12.3} {max:>12.3}")?;
    }
    writeln!(out)?;
    writeln!(out, "class distribution:")?;
    for (label, count) in raw.class_counts() {
        let share = count as f64 / raw.len() as f64 * 100.0;
        writeln!(out, "  {label:<20} {count:>6} ({share:.1}%)")?;
    }
    Ok(())
}

pub fn training_report(
    out: &mut impl Write,
    report: &TrainingReport,
    class_names: &[String],
) -> io::Result<()> {
    let evaluation = &report.evaluation;
    writeln!(
        out,
        "trained on {} rows, tested on {} rows",
        report.train_size, report.test_size
    )?;
    writeln!(out, "accuracy: {:.2}%", evaluation.accuracy * 100.0)?;

    writeln!(out)?;
    writeln!(out, "confusion matrix (rows: actual, columns: predicted)")?;
    write!(out, "{:<20}", "")?;
    for name in class_names {
        write!(out, " {name:>18}")?;
    }
    writeln!(out)?;
    for (name, row) in class_names.iter().zip(&evaluation.confusion) {
        write!(out, "{name:<20}")?;
        for count in row {
            write!(out, " {count:>18}")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{:<20} {:>10} {:>10} {:>10} {:>8}",
        "class", "precision", "recall", "f1", "support"
    )?;
    for (name, metrics) in class_names.iter().zip(&evaluation.per_class) {
        writeln!(
            out,
            "{name:<20} {:>10.3} {:>10.3} {:>10.3} {:>8}",
            metrics.precision, metrics.recall, metrics.f1, metrics.support
        )?;
    }
    for (name, metrics) in [
        ("macro avg", &evaluation.macro_avg),
        ("weighted avg", &evaluation.weighted_avg),
    ] {
        writeln!(
            out,
            "{name:<20} {:>10.3} {:>10.3} {:>10.3} {:>8}",
            metrics.precision, metrics.recall, metrics.f1, metrics.support
        )?;
    }

    writeln!(out)?;
    writeln!(out, "feature importance:")?;
    for (name, importance) in &report.importances {
        writeln!(out, "  {name:<24} {importance:.4}")?;
    }

    writeln!(out)?;
    rules_listing(out, &report.rules, Some(RULE_PREVIEW))
}

/// Numbered rules with one line per step; `limit` caps how many are shown.
pub fn rules_listing(
    out: &mut impl Write,
    rules: &[DecisionRule],
    limit: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "{} rules", rules.len())?;
    let shown = limit.unwrap_or(rules.len()).min(rules.len());
    for (i, rule) in rules.iter().take(shown).enumerate() {
        writeln!(out)?;
        rule_block(out, i + 1, rule)?;
    }
    if shown < rules.len() {
        writeln!(out)?;
        writeln!(out, "... and {} more rules", rules.len() - shown)?;
    }
    Ok(())
}

fn rule_block(out: &mut impl Write, number: usize, rule: &DecisionRule) -> io::Result<()> {
    writeln!(out, "Rule {number}: {}", rule.predicted_class)?;
    if rule.conditions.is_empty() {
        writeln!(out, "  always")?;
    }
    for (step, condition) in rule.conditions.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} {} {:.2}",
            step + 1,
            condition.feature_name,
            condition.operator.phrase(),
            condition.threshold
        )?;
    }
    writeln!(out, "  => {rule}")
}

pub fn prediction(
    out: &mut impl Write,
    prediction: &Prediction,
    category: AirQuality,
) -> io::Result<()> {
    writeln!(out, "category: {category}")?;
    writeln!(out, "{}", category.headline())?;
    writeln!(out)?;
    writeln!(out, "{}:", category.recommendation_title())?;
    for recommendation in category.recommendations() {
        writeln!(out, "  - {recommendation}")?;
    }
    writeln!(out)?;
    writeln!(out, "decision path:")?;
    rule_block(out, 1, &prediction.path)
}
