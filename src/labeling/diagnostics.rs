//! Diagnostics logged around a labeling run. None of them can fail the run.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::LabelerConfig;
use super::partition::Partition;
use crate::ml::cross_validation::{CrossValidationReport, cross_validate, plan_folds};
use crate::ml::{Prediction, SentimentModel};
use crate::sentiment::Sentiment;
use crate::summary::DatasetSummary;

/// Count and mean confidence of the predictions written in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub counts: BTreeMap<Sentiment, usize>,
    pub mean_confidence: f64,
}

impl PredictionSummary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut counts = BTreeMap::new();
        for prediction in predictions {
            *counts.entry(prediction.sentiment).or_default() += 1;
        }
        let mean_confidence = if predictions.is_empty() {
            0.0
        } else {
            predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64
        };
        Self {
            counts,
            mean_confidence,
        }
    }
}

pub fn class_distribution(labels: &[Sentiment]) -> BTreeMap<Sentiment, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(*label).or_default() += 1;
    }
    counts
}

pub(super) fn log_invalid_labels(partition: &Partition) {
    if partition.invalid.is_empty() {
        return;
    }
    warn!(
        "{} row(s) had an unrecognized sentiment and will be reclassified: {:?}",
        partition.invalid.len(),
        partition.invalid_values()
    );
}

pub(super) fn log_training_set(distribution: &BTreeMap<Sentiment, usize>, excluded: usize) {
    if excluded > 0 {
        info!("{excluded} labeled comment(s) were empty after cleaning and left out of training");
    }
    let classes = distribution
        .iter()
        .map(|(sentiment, count)| format!("{sentiment}={count}"))
        .collect::<Vec<_>>()
        .join(", ");
    info!("Training on {} comments ({classes})", distribution.values().sum::<usize>());
}

/// Stratified k-fold accuracy, or `None` when skipped or failed.
pub(super) fn cross_validation(
    documents: &[String],
    labels: &[Sentiment],
    config: &LabelerConfig,
) -> Option<CrossValidationReport> {
    let folds = match plan_folds(labels, &config.cross_validation) {
        Ok(folds) => folds,
        Err(reason) => {
            info!("Cross-validation skipped: {reason}");
            return None;
        }
    };
    match cross_validate(
        documents,
        labels,
        folds,
        &config.model,
        config.cross_validation.seed,
    ) {
        Ok(report) => {
            info!(
                "Cross-validation accuracy over {} folds: {:.3} (+/- {:.3})",
                report.folds, report.mean_accuracy, report.std_accuracy
            );
            for metric in &report.pooled.per_class {
                debug!(
                    "  {}: precision {:.3}, recall {:.3}, f1 {:.3}, support {}",
                    metric.class_id, metric.precision, metric.recall, metric.f1, metric.support
                );
            }
            Some(report)
        }
        Err(err) => {
            warn!("Cross-validation failed, continuing without it: {err}");
            None
        }
    }
}

pub(super) fn log_informative_terms(model: &SentimentModel, per_class: usize) {
    if per_class == 0 {
        return;
    }
    for &class in model.classes() {
        let terms = model
            .informative_terms(class, per_class)
            .into_iter()
            .map(|(term, _)| term)
            .collect::<Vec<_>>();
        if terms.is_empty() {
            warn!("No informative terms available for {class}");
            continue;
        }
        info!("Top terms for {class}: {}", terms.join(", "));
    }
}

pub(super) fn log_predictions(summary: &PredictionSummary) {
    let counts = summary
        .counts
        .iter()
        .map(|(sentiment, count)| format!("{sentiment}={count}"))
        .collect::<Vec<_>>()
        .join(", ");
    info!(
        "Predicted {} label(s) ({counts}), mean confidence {:.3}",
        summary.counts.values().sum::<usize>(),
        summary.mean_confidence
    );
}

pub(super) fn log_dataset_summary(summary: &DatasetSummary) {
    let counts = &summary.sentiments;
    info!(
        "Dataset now has {} rows: positive={}, neutral={}, negative={}, unlabeled={}",
        summary.total, counts.positive, counts.neutral, counts.negative, counts.unlabeled
    );
    for (platform, counts) in &summary.platforms {
        info!(
            "  {platform}: positive={}, neutral={}, negative={}",
            counts.positive, counts.neutral, counts.negative
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_summary_counts_and_averages() {
        let predictions = [
            Prediction {
                sentiment: Sentiment::Positive,
                confidence: 0.9,
            },
            Prediction {
                sentiment: Sentiment::Positive,
                confidence: 0.7,
            },
            Prediction {
                sentiment: Sentiment::Negative,
                confidence: 0.5,
            },
        ];
        let summary = PredictionSummary::from_predictions(&predictions);
        assert_eq!(summary.counts[&Sentiment::Positive], 2);
        assert_eq!(summary.counts[&Sentiment::Negative], 1);
        assert!((summary.mean_confidence - 0.7).abs() < 1e-9);
        assert_eq!(PredictionSummary::from_predictions(&[]).mean_confidence, 0.0);
    }

    #[test]
    fn skipped_cross_validation_returns_none() {
        let docs = vec!["keren".to_string(); 5];
        let labels = vec![Sentiment::Positive; 5];
        assert!(cross_validation(&docs, &labels, &LabelerConfig::default()).is_none());
    }
}
