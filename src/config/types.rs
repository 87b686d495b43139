use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::*;
use crate::text::CleanStep;

/// Errors that may occur while loading or saving `labeler.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Contents of `labeler.toml`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelerSettings {
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
    /// Backup location; defaults to `<dataset>.bak`.
    #[serde(default)]
    pub backup: Option<PathBuf>,
    #[serde(default = "default_min_training_rows")]
    pub min_training_rows: usize,
    #[serde(default = "default_informative_terms")]
    pub informative_terms: usize,
    #[serde(default)]
    pub labels: LabelSettings,
    #[serde(default)]
    pub columns: ColumnSettings,
    #[serde(default)]
    pub cleaning: CleaningSettings,
    #[serde(default)]
    pub vectorizer: VectorizerSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub cross_validation: CrossValidationSettings,
}

impl Default for LabelerSettings {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            backup: None,
            min_training_rows: default_min_training_rows(),
            informative_terms: default_informative_terms(),
            labels: LabelSettings::default(),
            columns: ColumnSettings::default(),
            cleaning: CleaningSettings::default(),
            vectorizer: VectorizerSettings::default(),
            classifier: ClassifierSettings::default(),
            cross_validation: CrossValidationSettings::default(),
        }
    }
}

/// Accepted spellings per class; the first is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSettings {
    #[serde(default = "default_positive")]
    pub positive: Vec<String>,
    #[serde(default = "default_neutral")]
    pub neutral: Vec<String>,
    #[serde(default = "default_negative")]
    pub negative: Vec<String>,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            neutral: default_neutral(),
            negative: default_negative(),
        }
    }
}

/// Header names tried for each logical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSettings {
    #[serde(default = "default_comment_columns")]
    pub comment: Vec<String>,
    #[serde(default = "default_sentiment_columns")]
    pub sentiment: Vec<String>,
    #[serde(default = "default_date_columns")]
    pub date: Vec<String>,
    #[serde(default = "default_platform_columns")]
    pub platform: Vec<String>,
    #[serde(default = "default_likes_columns")]
    pub likes: Vec<String>,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            comment: default_comment_columns(),
            sentiment: default_sentiment_columns(),
            date: default_date_columns(),
            platform: default_platform_columns(),
            likes: default_likes_columns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSettings {
    #[serde(default = "default_clean_steps")]
    pub steps: Vec<CleanStep>,
}

impl Default for CleaningSettings {
    fn default() -> Self {
        Self {
            steps: default_clean_steps(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerSettings {
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    /// Minimum number of documents a term must appear in.
    #[serde(default = "default_min_df")]
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    #[serde(default = "default_max_df")]
    pub max_df: f64,
    #[serde(default = "default_true")]
    pub sublinear_tf: bool,
}

impl Default for VectorizerSettings {
    fn default() -> Self {
        Self {
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
            min_df: default_min_df(),
            max_df: default_max_df(),
            sublinear_tf: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Additive smoothing.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cv_min_rows")]
    pub min_rows: usize,
    #[serde(default = "default_cv_min_classes")]
    pub min_classes: usize,
    #[serde(default = "default_cv_max_folds")]
    pub max_folds: usize,
    #[serde(default = "default_cv_seed")]
    pub seed: u64,
}

impl Default for CrossValidationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_rows: default_cv_min_rows(),
            min_classes: default_cv_min_classes(),
            max_folds: default_cv_max_folds(),
            seed: default_cv_seed(),
        }
    }
}
