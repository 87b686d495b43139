//! The labeling run: load, partition, train, predict and persist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use super::diagnostics::{self, PredictionSummary, class_distribution};
use super::errors::{LabelerError, RestoreStatus};
use super::partition::Partition;
use super::LabelerConfig;
use crate::dataset::{
    CommentTable, CsvFileWriter, TableWriter, backup_file, load_table, restore_backup,
};
use crate::ml::SentimentModel;
use crate::ml::cross_validation::CrossValidationReport;
use crate::sentiment::Sentiment;
use crate::summary::{DatasetSummary, SummaryFilter, summarize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Predictions were written to the dataset.
    Labeled,
    /// Every row already had a valid label; nothing was written.
    NothingToLabel,
}

/// Counts and diagnostics of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct LabelingOutcome {
    pub dataset: PathBuf,
    pub status: RunStatus,
    pub total_rows: usize,
    pub labeled_rows: usize,
    pub invalid_labels: usize,
    /// Labeled rows whose comment survived cleaning.
    pub training_rows: usize,
    pub training_classes: BTreeMap<Sentiment, usize>,
    pub vocabulary_size: usize,
    pub predictions: Option<PredictionSummary>,
    pub cross_validation: Option<CrossValidationReport>,
    pub backup_path: Option<PathBuf>,
    pub summary: DatasetSummary,
}

impl LabelingOutcome {
    fn new(dataset: &Path, table: &CommentTable, partition: &Partition) -> Self {
        Self {
            dataset: dataset.to_path_buf(),
            status: RunStatus::NothingToLabel,
            total_rows: table.len(),
            labeled_rows: partition.labeled.len(),
            invalid_labels: partition.invalid.len(),
            training_rows: 0,
            training_classes: BTreeMap::new(),
            vocabulary_size: 0,
            predictions: None,
            cross_validation: None,
            backup_path: None,
            summary: DatasetSummary::default(),
        }
    }
}

/// Fills absent sentiment labels with Naive Bayes predictions.
pub struct SentimentLabeler {
    config: LabelerConfig,
    writer: Box<dyn TableWriter>,
}

impl SentimentLabeler {
    pub fn new(config: LabelerConfig) -> Self {
        Self {
            config,
            writer: Box::new(CsvFileWriter),
        }
    }

    /// Replace the component that writes the labeled table back to disk.
    pub fn with_writer(mut self, writer: impl TableWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn config(&self) -> &LabelerConfig {
        &self.config
    }

    /// Run and reduce the result to a success flag, logging any failure.
    pub fn run_classifier(&self, dataset: &Path) -> bool {
        log_result(dataset, &self.run(dataset))
    }

    /// Label every row of `dataset` that lacks a valid sentiment.
    ///
    /// On error the file is left as it was before the call, unless writing
    /// failed and the backup could not be restored either.
    pub fn run(&self, dataset: &Path) -> Result<LabelingOutcome, LabelerError> {
        let config = &self.config;
        let table = load_table(dataset, &config.columns)?;
        info!("Loaded {} rows from {}", table.len(), dataset.display());

        let partition = Partition::split(&table, &config.labels);
        diagnostics::log_invalid_labels(&partition);
        info!(
            "{} labeled, {} to classify",
            partition.labeled.len(),
            partition.unlabeled.len()
        );
        if partition.labeled.len() < config.min_training_rows {
            return Err(LabelerError::InsufficientData {
                labeled: partition.labeled.len(),
                required: config.min_training_rows,
            });
        }

        let mut outcome = LabelingOutcome::new(dataset, &table, &partition);
        if partition.unlabeled.is_empty() {
            info!("No unlabeled rows; dataset left unchanged");
            outcome.summary = summarize(&table, &config.labels, &SummaryFilter::default());
            return Ok(outcome);
        }

        let (documents, labels) = self.training_set(&table, &partition);
        if documents.is_empty() {
            return Err(LabelerError::EmptyTrainingSet {
                labeled: partition.labeled.len(),
            });
        }
        outcome.training_rows = documents.len();
        outcome.training_classes = class_distribution(&labels);
        diagnostics::log_training_set(
            &outcome.training_classes,
            partition.labeled.len() - documents.len(),
        );

        outcome.cross_validation = diagnostics::cross_validation(&documents, &labels, config);

        let model = SentimentModel::fit(&documents, &labels, &config.model)?;
        outcome.vocabulary_size = model.vocabulary_size();
        info!("Vocabulary has {} terms", model.vocabulary_size());
        diagnostics::log_informative_terms(&model, config.informative_terms);

        let targets: Vec<String> = partition
            .unlabeled
            .iter()
            .map(|&index| self.cleaned_comment(&table, index))
            .collect();
        let predictions = model.predict_batch(&targets);
        let prediction_summary = PredictionSummary::from_predictions(&predictions);
        diagnostics::log_predictions(&prediction_summary);

        let spellings = partition.preferred_spellings(&config.labels);
        let updates: BTreeMap<usize, String> = partition
            .unlabeled
            .iter()
            .zip(&predictions)
            .map(|(&index, prediction)| {
                let label = spellings
                    .get(&prediction.sentiment)
                    .cloned()
                    .unwrap_or_else(|| config.labels.canonical(prediction.sentiment).to_string());
                (index, label)
            })
            .collect();
        let labeled_table = table.with_sentiments(&updates);

        let backup_path = self.persist(dataset, &labeled_table)?;
        outcome.status = RunStatus::Labeled;
        outcome.predictions = Some(prediction_summary);
        outcome.backup_path = Some(backup_path);
        outcome.summary = summarize(&labeled_table, &config.labels, &SummaryFilter::default());
        diagnostics::log_dataset_summary(&outcome.summary);
        Ok(outcome)
    }

    /// Cleaned comments and labels of the labeled rows, skipping empty comments.
    fn training_set(&self, table: &CommentTable, partition: &Partition) -> (Vec<String>, Vec<Sentiment>) {
        partition
            .labeled
            .iter()
            .filter_map(|row| {
                let cleaned = self.cleaned_comment(table, row.index);
                (!cleaned.is_empty()).then_some((cleaned, row.sentiment))
            })
            .unzip()
    }

    fn cleaned_comment(&self, table: &CommentTable, index: usize) -> String {
        table
            .row(index)
            .map(|row| self.config.cleaner.clean(row.comment()))
            .unwrap_or_default()
    }

    /// Back up the dataset, then overwrite it; restore the backup if writing fails.
    fn persist(&self, dataset: &Path, table: &CommentTable) -> Result<PathBuf, LabelerError> {
        let backup_path = self.config.backup_path_for(dataset);
        backup_file(dataset, &backup_path).map_err(|source| LabelerError::Persist {
            source,
            restore: RestoreStatus::NotAttempted,
        })?;
        info!("Backed up {} to {}", dataset.display(), backup_path.display());

        let Err(source) = self.writer.write_table(table, dataset) else {
            info!("Wrote labeled dataset to {}", dataset.display());
            return Ok(backup_path);
        };
        warn!("Writing {} failed, restoring backup: {source}", dataset.display());
        let restore = match restore_backup(&backup_path, dataset) {
            Ok(()) => {
                info!("Restored {} from {}", dataset.display(), backup_path.display());
                RestoreStatus::Restored
            }
            Err(err) => RestoreStatus::Failed(err),
        };
        Err(LabelerError::Persist { source, restore })
    }
}

/// Label `dataset` with the default configuration.
pub fn run_classifier(dataset: impl AsRef<Path>) -> bool {
    SentimentLabeler::new(LabelerConfig::default()).run_classifier(dataset.as_ref())
}

/// Log the end of a run and return whether it succeeded.
pub fn log_result(dataset: &Path, result: &Result<LabelingOutcome, LabelerError>) -> bool {
    let err = match result {
        Ok(outcome) => {
            match (&outcome.status, &outcome.backup_path) {
                (RunStatus::Labeled, Some(backup)) => info!(
                    "Labeling finished for {}; backup kept at {}",
                    dataset.display(),
                    backup.display()
                ),
                _ => info!("Labeling finished for {}; nothing written", dataset.display()),
            }
            return true;
        }
        Err(err) => err,
    };
    error!("[{}] Labeling {} failed: {err}", err.kind(), dataset.display());
    if let LabelerError::Persist {
        restore: RestoreStatus::Failed(restore_err),
        ..
    } = err
    {
        error!(
            "CRITICAL: {} could not be restored from backup and may be corrupt: {restore_err}",
            dataset.display()
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PersistError;
    use std::fs;
    use tempfile::tempdir;

    struct RejectingWriter;

    impl TableWriter for RejectingWriter {
        fn write_table(&self, _table: &CommentTable, dest: &Path) -> Result<(), PersistError> {
            fs::write(dest, "half written").map_err(|source| PersistError::Write {
                path: dest.to_path_buf(),
                source,
            })?;
            Err(PersistError::Write {
                path: dest.to_path_buf(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn dataset(labeled: usize, unlabeled: usize) -> String {
        let mut out = String::from("\"komentar\",\"sentimen\"\n");
        for i in 0..labeled {
            if i % 2 == 0 {
                out.push_str("\"keren banget suka\",\"positif\"\n");
            } else {
                out.push_str("\"jelek kecewa banget\",\"negatif\"\n");
            }
        }
        for _ in 0..unlabeled {
            out.push_str("\"suka keren\",\"\"\n");
        }
        out
    }

    #[test]
    fn fills_only_missing_labels_in_training_spelling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hasil.csv");
        fs::write(&path, dataset(10, 2)).unwrap();

        let outcome = SentimentLabeler::new(LabelerConfig::default())
            .run(&path)
            .unwrap();

        assert_eq!(outcome.status, RunStatus::Labeled);
        assert_eq!(outcome.training_rows, 10);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("\"suka keren\",\"positif\"\n\"suka keren\",\"positif\"\n"));
        assert_eq!(
            fs::read_to_string(dir.path().join("hasil.csv.bak")).unwrap(),
            dataset(10, 2)
        );
    }

    #[test]
    fn rejected_write_restores_original_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hasil.csv");
        fs::write(&path, dataset(10, 2)).unwrap();

        let err = SentimentLabeler::new(LabelerConfig::default())
            .with_writer(RejectingWriter)
            .run(&path)
            .unwrap_err();

        assert_eq!(err.kind(), "PersistError");
        assert!(matches!(
            err,
            LabelerError::Persist {
                restore: RestoreStatus::Restored,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), dataset(10, 2));
    }

    #[test]
    fn too_few_labels_fail_before_any_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hasil.csv");
        fs::write(&path, dataset(9, 3)).unwrap();

        let labeler = SentimentLabeler::new(LabelerConfig::default());
        assert!(!labeler.run_classifier(&path));
        assert!(!dir.path().join("hasil.csv.bak").exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), dataset(9, 3));
    }
}
