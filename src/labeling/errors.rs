use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::{DatasetError, PersistError};
use crate::ml::ModelError;
use crate::ml::tfidf::VocabularyError;

/// What happened to the dataset after a failed write.
#[derive(Debug)]
pub enum RestoreStatus {
    /// The dataset was never touched (the backup step itself failed).
    NotAttempted,
    /// The backup was copied back over the dataset.
    Restored,
    /// Copying the backup back failed; the dataset may be damaged.
    Failed(PersistError),
}

/// Reasons a labeling run fails. None of them leave the dataset modified,
/// except a persist failure whose restore also failed.
#[derive(Debug, Error)]
pub enum LabelerError {
    #[error("Dataset not found at {path}")]
    NotFound { path: PathBuf },
    #[error("Failed to read dataset {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
    #[error("Dataset is missing required column(s) {missing:?}; found {found:?}")]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },
    #[error("Only {labeled} labeled rows, at least {required} needed to train")]
    InsufficientData { labeled: usize, required: usize },
    #[error("All {labeled} labeled comments are empty after cleaning")]
    EmptyTrainingSet { labeled: usize },
    #[error("Could not build a vocabulary from the training comments: {0}")]
    Vocabulary(#[from] VocabularyError),
    #[error("Failed to train the classifier: {0}")]
    Model(ModelError),
    #[error("{source}")]
    Persist {
        source: PersistError,
        restore: RestoreStatus,
    },
}

impl LabelerError {
    /// Stable name used in log lines and run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            LabelerError::NotFound { .. } => "NotFoundError",
            LabelerError::Read { .. } => "ReadError",
            LabelerError::Schema { .. } => "SchemaError",
            LabelerError::InsufficientData { .. } => "InsufficientDataError",
            LabelerError::EmptyTrainingSet { .. } => "EmptyTrainingSetError",
            LabelerError::Vocabulary(_) => "VocabularyError",
            LabelerError::Model(_) => "ModelError",
            LabelerError::Persist { .. } => "PersistError",
        }
    }

    /// True when the dataset may differ from its state before the run.
    pub fn dataset_at_risk(&self) -> bool {
        matches!(
            self,
            LabelerError::Persist {
                restore: RestoreStatus::Failed(_),
                ..
            }
        )
    }
}

impl From<DatasetError> for LabelerError {
    fn from(error: DatasetError) -> Self {
        match error {
            DatasetError::NotFound { path } => LabelerError::NotFound { path },
            DatasetError::Read { path, source } => LabelerError::Read { path, source },
            DatasetError::MissingColumns { missing, found } => {
                LabelerError::Schema { missing, found }
            }
        }
    }
}

impl From<ModelError> for LabelerError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Vocabulary(inner) => LabelerError::Vocabulary(inner),
            other => LabelerError::Model(other),
        }
    }
}
