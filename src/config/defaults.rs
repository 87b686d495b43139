use std::path::PathBuf;

use crate::text::CleanStep;

pub(super) const MIN_FOLD_CAP: usize = 2;

pub(super) fn default_dataset() -> PathBuf {
    PathBuf::from("data/hasil.csv")
}

pub(super) fn default_min_training_rows() -> usize {
    10
}

pub(super) fn default_informative_terms() -> usize {
    5
}

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_positive() -> Vec<String> {
    strings(&["positive", "positif"])
}

pub(super) fn default_neutral() -> Vec<String> {
    strings(&["neutral", "netral"])
}

pub(super) fn default_negative() -> Vec<String> {
    strings(&["negative", "negatif"])
}

pub(super) fn default_comment_columns() -> Vec<String> {
    strings(&["komentar", "comment"])
}

pub(super) fn default_sentiment_columns() -> Vec<String> {
    strings(&["sentimen", "sentiment"])
}

pub(super) fn default_date_columns() -> Vec<String> {
    strings(&["tanggal", "date"])
}

pub(super) fn default_platform_columns() -> Vec<String> {
    strings(&["platform"])
}

pub(super) fn default_likes_columns() -> Vec<String> {
    strings(&["likes"])
}

pub(super) fn default_clean_steps() -> Vec<CleanStep> {
    CleanStep::DEFAULT_ORDER.to_vec()
}

pub(super) fn default_ngram_min() -> usize {
    1
}

pub(super) fn default_ngram_max() -> usize {
    2
}

pub(super) fn default_min_df() -> usize {
    2
}

pub(super) fn default_max_df() -> f64 {
    0.95
}

pub(super) fn default_alpha() -> f64 {
    0.5
}

pub(super) fn default_cv_min_rows() -> usize {
    30
}

pub(super) fn default_cv_min_classes() -> usize {
    2
}

pub(super) fn default_cv_max_folds() -> usize {
    5
}

pub(super) fn default_cv_seed() -> u64 {
    42
}

pub(super) fn clamp_max_df(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(1.0)
    } else {
        default_max_df()
    }
}

pub(super) fn clamp_alpha(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default_alpha()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
