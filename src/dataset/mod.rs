//! Comment dataset storage: loading, validation and safe persistence.
//!
//! The dataset is a quoted CSV file with one header row. Rows are kept as raw
//! records so everything the labeler does not touch is written back as read.

pub mod loader;
pub mod persist;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{load_table, write_table};
pub use persist::{CsvFileWriter, PersistError, TableWriter, backup_file, default_backup_path, restore_backup};
pub use table::{ColumnCandidates, ColumnLayout, CommentRow, CommentTable, FileFormat, LineEnding};

/// Errors raised while loading or validating a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("Dataset not found at {path}")]
    NotFound { path: PathBuf },
    /// The file could not be read or parsed as CSV.
    #[error("Failed to read dataset {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
    /// Required columns are missing from the header row.
    #[error("Dataset is missing required column(s) {missing:?}; found {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}
