use super::MultinomialNb;
use crate::ml::ModelError;
use crate::ml::tfidf::SparseRow;
use crate::sentiment::Sentiment;

/// Training options for the Naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Additive (Laplace/Lidstone) smoothing.
    pub alpha: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

/// In-memory training set of vectorized documents.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub x: Vec<SparseRow>,
    pub y: Vec<Sentiment>,
    pub n_features: usize,
}

pub fn train_naive_bayes(
    dataset: &TrainDataset,
    options: &TrainOptions,
) -> Result<MultinomialNb, ModelError> {
    if dataset.x.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }
    if dataset.x.len() != dataset.y.len() {
        return Err(ModelError::MismatchedInputs {
            rows: dataset.x.len(),
            labels: dataset.y.len(),
        });
    }
    if options.alpha <= 0.0 || !options.alpha.is_finite() {
        return Err(ModelError::InvalidAlpha(options.alpha));
    }
    let dim = dataset.n_features;

    let mut classes: Vec<Sentiment> = dataset.y.clone();
    classes.sort();
    classes.dedup();
    let k = classes.len();

    let mut class_count = vec![0f64; k];
    let mut feature_count = vec![0f64; k * dim];
    for (row, label) in dataset.x.iter().zip(&dataset.y) {
        let Some(class_idx) = classes.iter().position(|c| c == label) else {
            continue;
        };
        class_count[class_idx] += 1.0;
        let base = class_idx * dim;
        for &(column, weight) in row {
            if column >= dim {
                return Err(ModelError::FeatureOutOfRange {
                    column,
                    n_features: dim,
                });
            }
            feature_count[base + column] += weight;
        }
    }

    let total = dataset.y.len() as f64;
    let class_log_prior = class_count.iter().map(|c| (c / total).ln()).collect();

    let mut feature_log_prob = vec![0f64; k * dim];
    for class_idx in 0..k {
        let base = class_idx * dim;
        let smoothed_total: f64 =
            feature_count[base..base + dim].iter().sum::<f64>() + options.alpha * dim as f64;
        let log_total = smoothed_total.ln();
        for j in 0..dim {
            feature_log_prob[base + j] = (feature_count[base + j] + options.alpha).ln() - log_total;
        }
    }

    Ok(MultinomialNb {
        classes,
        class_log_prior,
        feature_log_prob,
        n_features: dim,
        alpha: options.alpha,
    })
}
