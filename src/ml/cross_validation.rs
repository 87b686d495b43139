//! Stratified k-fold cross-validation for diagnostic accuracy reporting.
//!
//! Fold assignment is shuffled with a seeded RNG; the result never feeds back
//! into the final model.

use std::collections::BTreeMap;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

use super::metrics::{ConfusionMatrix, ModelMetrics, accuracy};
use super::{ModelError, ModelOptions, SentimentModel};
use crate::sentiment::Sentiment;

/// Gate and fold settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossValidationOptions {
    pub enabled: bool,
    /// Minimum training rows before cross-validation runs.
    pub min_rows: usize,
    /// Minimum distinct classes before cross-validation runs.
    pub min_classes: usize,
    /// Upper bound on the fold count.
    pub max_folds: usize,
    pub seed: u64,
}

impl Default for CrossValidationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            min_rows: 30,
            min_classes: 2,
            max_folds: 5,
            seed: 42,
        }
    }
}

/// Why cross-validation was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    TooFewRows { rows: usize, required: usize },
    TooFewClasses { classes: usize, required: usize },
    DegenerateFolds { folds: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "disabled in configuration"),
            SkipReason::TooFewRows { rows, required } => {
                write!(f, "{rows} training rows, {required} required")
            }
            SkipReason::TooFewClasses { classes, required } => {
                write!(f, "{classes} distinct classes, {required} required")
            }
            SkipReason::DegenerateFolds { folds } => {
                write!(f, "only {folds} fold(s) possible")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CrossValidationError {
    #[error("Fold {fold} has no training rows")]
    EmptyFold { fold: usize },
    #[error("Fold {fold} failed to train: {source}")]
    Fold { fold: usize, source: ModelError },
}

/// Accuracy per fold plus metrics pooled over every held-out prediction.
#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationReport {
    pub folds: usize,
    pub fold_accuracies: Vec<f32>,
    pub mean_accuracy: f32,
    pub std_accuracy: f32,
    pub pooled: ModelMetrics,
}

/// Decide the fold count: `min(max_folds, rows / classes)`, skipping below two folds.
pub fn plan_folds(labels: &[Sentiment], options: &CrossValidationOptions) -> Result<usize, SkipReason> {
    if !options.enabled {
        return Err(SkipReason::Disabled);
    }
    let rows = labels.len();
    if rows < options.min_rows {
        return Err(SkipReason::TooFewRows {
            rows,
            required: options.min_rows,
        });
    }
    let mut distinct = labels.to_vec();
    distinct.sort();
    distinct.dedup();
    let classes = distinct.len();
    if classes < options.min_classes.max(1) {
        return Err(SkipReason::TooFewClasses {
            classes,
            required: options.min_classes,
        });
    }
    let folds = options.max_folds.min(rows / classes);
    if folds < 2 {
        return Err(SkipReason::DegenerateFolds { folds });
    }
    Ok(folds)
}

/// Stratified fold index for every row.
pub fn assign_folds(labels: &[Sentiment], folds: usize, seed: u64) -> Vec<usize> {
    let mut by_class: BTreeMap<Sentiment, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_class.entry(*label).or_default().push(idx);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut assignment = vec![0usize; labels.len()];
    let mut next = 0usize;
    for (_, mut indices) in by_class {
        indices.shuffle(&mut rng);
        for idx in indices {
            assignment[idx] = next % folds.max(1);
            next += 1;
        }
    }
    assignment
}

/// Train on `k - 1` folds and score the held-out fold, for every fold.
pub fn cross_validate<S: AsRef<str>>(
    documents: &[S],
    labels: &[Sentiment],
    folds: usize,
    model_options: &ModelOptions,
    seed: u64,
) -> Result<CrossValidationReport, CrossValidationError> {
    let assignment = assign_folds(labels, folds, seed);
    let mut pooled = ConfusionMatrix::default();
    let mut fold_accuracies = Vec::with_capacity(folds);
    for fold in 0..folds {
        let mut train_docs = Vec::new();
        let mut train_labels = Vec::new();
        let mut held_out = Vec::new();
        for (idx, &assigned) in assignment.iter().enumerate() {
            if assigned == fold {
                held_out.push(idx);
            } else {
                train_docs.push(documents[idx].as_ref());
                train_labels.push(labels[idx]);
            }
        }
        if train_docs.is_empty() {
            return Err(CrossValidationError::EmptyFold { fold });
        }
        let model = SentimentModel::fit(&train_docs, &train_labels, model_options)
            .map_err(|source| CrossValidationError::Fold { fold, source })?;
        let mut cm = ConfusionMatrix::default();
        for idx in held_out {
            let predicted = model.predict(documents[idx].as_ref()).sentiment;
            cm.add(labels[idx], predicted);
        }
        fold_accuracies.push(accuracy(&cm));
        pooled.merge(&cm);
    }
    let n = fold_accuracies.len().max(1) as f32;
    let mean_accuracy = fold_accuracies.iter().sum::<f32>() / n;
    let variance = fold_accuracies
        .iter()
        .map(|acc| (acc - mean_accuracy).powi(2))
        .sum::<f32>()
        / n;
    Ok(CrossValidationReport {
        folds,
        fold_accuracies,
        mean_accuracy,
        std_accuracy: variance.sqrt(),
        pooled: ModelMetrics::from_confusion(&pooled),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pos: usize, neg: usize) -> Vec<Sentiment> {
        let mut out = vec![Sentiment::Positive; pos];
        out.extend(vec![Sentiment::Negative; neg]);
        out
    }

    #[test]
    fn gate_requires_rows_and_classes() {
        let options = CrossValidationOptions::default();
        assert_eq!(
            plan_folds(&labels(20, 9), &options),
            Err(SkipReason::TooFewRows { rows: 29, required: 30 })
        );
        assert_eq!(
            plan_folds(&labels(30, 0), &options),
            Err(SkipReason::TooFewClasses { classes: 1, required: 2 })
        );
        assert_eq!(plan_folds(&labels(15, 15), &options), Ok(5));
    }

    #[test]
    fn fold_count_scales_with_rows_per_class() {
        let options = CrossValidationOptions {
            min_rows: 4,
            ..CrossValidationOptions::default()
        };
        let mut three_classes = labels(3, 2);
        three_classes.push(Sentiment::Neutral);
        assert_eq!(plan_folds(&three_classes, &options), Ok(2));
        assert_eq!(plan_folds(&labels(3, 1), &options), Ok(2));
        let sparse = CrossValidationOptions {
            min_rows: 2,
            ..CrossValidationOptions::default()
        };
        assert_eq!(
            plan_folds(&labels(1, 2), &sparse),
            Err(SkipReason::DegenerateFolds { folds: 1 })
        );
    }

    #[test]
    fn folds_are_stratified_and_seeded() {
        let y = labels(10, 10);
        let a = assign_folds(&y, 5, 7);
        let b = assign_folds(&y, 5, 7);
        assert_eq!(a, b);
        for fold in 0..5 {
            let positives = (0..10).filter(|&i| a[i] == fold).count();
            let negatives = (10..20).filter(|&i| a[i] == fold).count();
            assert_eq!(positives, 2);
            assert_eq!(negatives, 2);
        }
    }

    #[test]
    fn separable_corpus_scores_well() {
        let mut docs = Vec::new();
        let mut y = Vec::new();
        for i in 0..15 {
            docs.push(format!("keren banget suka {}", ["show", "lagu", "konser"][i % 3]));
            y.push(Sentiment::Positive);
            docs.push(format!("jelek kecewa banget {}", ["show", "lagu", "konser"][i % 3]));
            y.push(Sentiment::Negative);
        }
        let folds = plan_folds(&y, &CrossValidationOptions::default()).unwrap();
        let report = cross_validate(&docs, &y, folds, &ModelOptions::default(), 42).unwrap();
        assert_eq!(report.folds, 5);
        assert_eq!(report.fold_accuracies.len(), 5);
        assert!(report.mean_accuracy > 0.9);
    }
}
