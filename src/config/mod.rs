//! Labeler settings persisted as TOML in the app directory.

mod defaults;
mod io;
mod types;

pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save_to_path};
pub use types::{
    ClassifierSettings, CleaningSettings, ColumnSettings, ConfigError, CrossValidationSettings,
    LabelSettings, LabelerSettings, VectorizerSettings,
};

use crate::dataset::ColumnCandidates;
use crate::labeling::LabelerConfig;
use crate::ml::ModelOptions;
use crate::ml::cross_validation::CrossValidationOptions;
use crate::ml::naive_bayes::TrainOptions;
use crate::ml::tfidf::TfidfOptions;
use crate::sentiment::{LabelSet, Sentiment};
use crate::text::TextCleaner;

impl LabelerSettings {
    /// Clamp values into the ranges the labeler accepts.
    pub fn normalized(mut self) -> Self {
        let vectorizer = &mut self.vectorizer;
        vectorizer.ngram_min = vectorizer.ngram_min.max(1);
        vectorizer.ngram_max = vectorizer.ngram_max.max(vectorizer.ngram_min);
        vectorizer.max_df = defaults::clamp_max_df(vectorizer.max_df);
        self.classifier.alpha = defaults::clamp_alpha(self.classifier.alpha);
        self.cross_validation.max_folds = self.cross_validation.max_folds.max(defaults::MIN_FOLD_CAP);
        self
    }

    /// Runtime configuration for [`crate::labeling::SentimentLabeler`].
    pub fn into_config(self) -> LabelerConfig {
        let settings = self.normalized();
        let labels = LabelSet::from_spellings([
            (Sentiment::Positive, settings.labels.positive),
            (Sentiment::Neutral, settings.labels.neutral),
            (Sentiment::Negative, settings.labels.negative),
        ]);
        let columns = ColumnCandidates {
            comment: settings.columns.comment,
            sentiment: settings.columns.sentiment,
            date: settings.columns.date,
            platform: settings.columns.platform,
            likes: settings.columns.likes,
        };
        let model = ModelOptions {
            tfidf: TfidfOptions {
                ngram_min: settings.vectorizer.ngram_min,
                ngram_max: settings.vectorizer.ngram_max,
                min_df: settings.vectorizer.min_df,
                max_df: settings.vectorizer.max_df,
                sublinear_tf: settings.vectorizer.sublinear_tf,
            },
            naive_bayes: TrainOptions {
                alpha: settings.classifier.alpha,
            },
        };
        let cv = settings.cross_validation;
        LabelerConfig {
            min_training_rows: settings.min_training_rows,
            labels,
            columns,
            cleaner: TextCleaner::new(settings.cleaning.steps),
            model,
            cross_validation: CrossValidationOptions {
                enabled: cv.enabled,
                min_rows: cv.min_rows,
                min_classes: cv.min_classes,
                max_folds: cv.max_folds,
                seed: cv.seed,
            },
            informative_terms: settings.informative_terms,
            backup_path: settings.backup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::CleanStep;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, LabelerSettings::default());
        assert_eq!(settings.dataset, PathBuf::from("data/hasil.csv"));
    }

    #[test]
    fn partial_file_keeps_other_defaults_and_is_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
dataset = "comments.csv"
min_training_rows = 20

[labels]
positive = ["good"]

[cleaning]
steps = ["lowercase", "trim"]

[vectorizer]
max_df = 3.0

[classifier]
alpha = -1.0

[cross_validation]
max_folds = 1
"#,
        )
        .unwrap();

        let settings = load_from(&path).unwrap();
        assert_eq!(settings.dataset, PathBuf::from("comments.csv"));
        assert_eq!(settings.vectorizer.max_df, 1.0);
        assert_eq!(settings.classifier.alpha, 0.5);
        assert_eq!(settings.cross_validation.max_folds, 2);
        assert_eq!(settings.columns, ColumnSettings::default());

        let config = settings.into_config();
        assert_eq!(config.min_training_rows, 20);
        assert_eq!(config.labels.parse("Good"), Some(Sentiment::Positive));
        assert_eq!(config.labels.parse("positif"), None);
        assert_eq!(config.labels.parse("netral"), Some(Sentiment::Neutral));
        assert_eq!(config.cleaner.steps(), &[CleanStep::Lowercase, CleanStep::Trim]);
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "min_training_rows = \"ten\"").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut settings = LabelerSettings::default();
        settings.backup = Some(PathBuf::from("backups/hasil.csv"));
        settings.cross_validation.seed = 7;
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), settings);
    }
}
