//! Multinomial Naive Bayes over sparse tf-idf rows.
//!
//! Only classes present in the training data are part of the model, so a
//! class with zero training examples can never be predicted.

mod train;

pub use train::{TrainDataset, TrainOptions, train_naive_bayes};

use serde::{Deserialize, Serialize};

use crate::ml::tfidf::SparseRow;
use crate::sentiment::Sentiment;

/// Fitted multinomial Naive Bayes model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Classes seen during training, in `Sentiment` order.
    pub classes: Vec<Sentiment>,
    /// `ln P(class)` for each entry of `classes`.
    pub class_log_prior: Vec<f64>,
    /// Row-major `[class][feature]` smoothed `ln P(feature | class)`.
    pub feature_log_prob: Vec<f64>,
    pub n_features: usize,
    /// Additive smoothing used at training time.
    pub alpha: f64,
}

impl MultinomialNb {
    /// Unnormalized log posterior for each class.
    pub fn joint_log_likelihood(&self, row: &SparseRow) -> Vec<f64> {
        self.classes
            .iter()
            .enumerate()
            .map(|(class_idx, _)| {
                let base = class_idx * self.n_features;
                let evidence: f64 = row
                    .iter()
                    .filter(|(column, _)| *column < self.n_features)
                    .map(|(column, weight)| weight * self.feature_log_prob[base + column])
                    .sum();
                self.class_log_prior[class_idx] + evidence
            })
            .collect()
    }

    /// Most likely class; on a tie the class whose name sorts first wins.
    pub fn predict(&self, row: &SparseRow) -> Sentiment {
        let jll = self.joint_log_likelihood(row);
        self.classes[self.best_class(&jll)]
    }

    /// Posterior probabilities aligned with `classes`.
    pub fn predict_proba(&self, row: &SparseRow) -> Vec<f64> {
        softmax(&self.joint_log_likelihood(row))
    }

    /// Feature columns with the highest `ln P(feature | class)`.
    pub fn top_features(&self, class: Sentiment, n: usize) -> Vec<(usize, f64)> {
        let Some(class_idx) = self.classes.iter().position(|c| *c == class) else {
            return Vec::new();
        };
        let base = class_idx * self.n_features;
        let mut scored: Vec<(usize, f64)> = self.feature_log_prob[base..base + self.n_features]
            .iter()
            .copied()
            .enumerate()
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(n);
        scored
    }

    // "negative" < "neutral" < "positive", and the same holds for the
    // Indonesian spellings, so alphabetical order is spelling-independent.
    fn best_class(&self, jll: &[f64]) -> usize {
        let mut best = 0usize;
        for (idx, &val) in jll.iter().enumerate().skip(1) {
            let tied = val == jll[best] && self.classes[idx].as_str() < self.classes[best].as_str();
            if val > jll[best] || tied {
                best = idx;
            }
        }
        best
    }
}


fn softmax(log_values: &[f64]) -> Vec<f64> {
    let max = log_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = log_values.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![1.0 / log_values.len().max(1) as f64; log_values.len()];
    }
    exps.into_iter().map(|v| v / sum).collect()
}
