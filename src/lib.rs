//! Sentiment labeling for a CSV dataset of social-media comments.
//!
//! Rows that already carry a sentiment train a tf-idf + multinomial Naive
//! Bayes model, which then fills in the rows that do not.

/// Application directory resolution.
pub mod app_dirs;
/// TOML-backed labeler settings.
pub mod config;
/// Dataset loading and persistence.
pub mod dataset;
/// The labeling run and its error reporting.
pub mod labeling;
/// Logging setup.
pub mod logging;
/// Feature extraction, classifier and evaluation.
pub mod ml;
/// Sentiment classes and label spellings.
pub mod sentiment;
/// Aggregate counts over a dataset.
pub mod summary;
/// Comment text cleaning.
pub mod text;

pub use labeling::{LabelerConfig, LabelerError, SentimentLabeler, run_classifier};
pub use sentiment::Sentiment;
