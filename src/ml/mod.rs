//! Machine learning building blocks for sentiment labeling.
//!
//! Everything here is trained from scratch on each run: the vectorizer and the
//! Naive Bayes model are fitted on the labeled rows and discarded afterwards.

pub mod cross_validation;
pub mod metrics;
pub mod naive_bayes;
pub mod text_classifier;
pub mod tfidf;

use thiserror::Error;

pub use text_classifier::{ModelOptions, Prediction, SentimentModel};

/// Errors raised while fitting a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Empty training set")]
    EmptyTrainingSet,
    #[error("Mismatched training inputs/labels ({rows} rows, {labels} labels)")]
    MismatchedInputs { rows: usize, labels: usize },
    #[error("Smoothing alpha must be positive and finite, got {0}")]
    InvalidAlpha(f64),
    #[error("Feature column {column} out of range for {n_features} features")]
    FeatureOutOfRange { column: usize, n_features: usize },
    #[error(transparent)]
    Vocabulary(#[from] tfidf::VocabularyError),
}
