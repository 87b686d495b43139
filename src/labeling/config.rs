//! Runtime parameters injected into the labeler.

use std::path::{Path, PathBuf};

use crate::dataset::{ColumnCandidates, default_backup_path};
use crate::ml::ModelOptions;
use crate::ml::cross_validation::CrossValidationOptions;
use crate::sentiment::LabelSet;
use crate::text::TextCleaner;

/// Everything a labeling run needs besides the dataset path.
#[derive(Debug, Clone)]
pub struct LabelerConfig {
    /// Fewer labeled rows than this aborts the run.
    pub min_training_rows: usize,
    pub labels: LabelSet,
    pub columns: ColumnCandidates,
    pub cleaner: TextCleaner,
    pub model: ModelOptions,
    pub cross_validation: CrossValidationOptions,
    /// Terms logged per class after training; `0` disables the diagnostic.
    pub informative_terms: usize,
    /// Backup location; `None` means `<dataset>.bak`.
    pub backup_path: Option<PathBuf>,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            min_training_rows: 10,
            labels: LabelSet::default(),
            columns: ColumnCandidates::default(),
            cleaner: TextCleaner::default(),
            model: ModelOptions::default(),
            cross_validation: CrossValidationOptions::default(),
            informative_terms: 5,
            backup_path: None,
        }
    }
}

impl LabelerConfig {
    pub fn backup_path_for(&self, dataset: &Path) -> PathBuf {
        self.backup_path
            .clone()
            .unwrap_or_else(|| default_backup_path(dataset))
    }
}
