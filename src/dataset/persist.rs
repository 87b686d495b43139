//! Backup, overwrite and restore of the dataset file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{CommentTable, loader::write_table};

/// Errors raised while persisting a dataset.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Copying the dataset to its backup location failed.
    #[error("Failed to back up {path} to {backup_path}: {source}")]
    Backup {
        path: PathBuf,
        backup_path: PathBuf,
        source: std::io::Error,
    },
    /// The backup would overwrite the dataset itself.
    #[error("Backup path {path} is the dataset itself")]
    BackupIsDataset { path: PathBuf },
    /// Writing the new dataset contents failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serializing the dataset failed.
    #[error("Failed to serialize dataset for {path}: {source}")]
    Serialize { path: PathBuf, source: csv::Error },
    /// Copying the backup over the dataset failed.
    #[error("Failed to restore {path} from {backup_path}: {source}")]
    Restore {
        path: PathBuf,
        backup_path: PathBuf,
        source: std::io::Error,
    },
}

/// Destination for a fully labeled table.
pub trait TableWriter {
    /// Replace the contents of `dest` with `table`.
    fn write_table(&self, table: &CommentTable, dest: &Path) -> Result<(), PersistError>;
}

/// Writes to a temporary file next to the destination, then renames it into place.
///
/// An existing destination keeps its permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFileWriter;

impl TableWriter for CsvFileWriter {
    fn write_table(&self, table: &CommentTable, dest: &Path) -> Result<(), PersistError> {
        let write_error = |source| PersistError::Write {
            path: dest.to_path_buf(),
            source,
        };
        let mut staged = tempfile::Builder::new()
            .prefix(".sentimen-")
            .suffix(".tmp")
            .tempfile_in(parent_dir(dest))
            .map_err(write_error)?;
        write_table(table, &mut staged).map_err(|source| PersistError::Serialize {
            path: dest.to_path_buf(),
            source,
        })?;
        staged.flush().map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        match fs::metadata(dest) {
            Ok(meta) => {
                fs::set_permissions(staged.path(), meta.permissions()).map_err(write_error)?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(write_error(err)),
        }
        staged
            .persist(dest)
            .map_err(|err| write_error(err.error))?;
        Ok(())
    }
}

/// Default backup location: the dataset path with a `.bak` suffix appended.
pub fn default_backup_path(dataset: &Path) -> PathBuf {
    let mut name = dataset
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string();
    name.push_str(".bak");
    dataset.with_file_name(name)
}

/// Copy `path` to `backup_path`, replacing any earlier backup.
pub fn backup_file(path: &Path, backup_path: &Path) -> Result<(), PersistError> {
    let backup_error = |source| PersistError::Backup {
        path: path.to_path_buf(),
        backup_path: backup_path.to_path_buf(),
        source,
    };
    if path == backup_path {
        return Err(PersistError::BackupIsDataset {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = backup_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(backup_error)?;
    }
    fs::copy(path, backup_path).map_err(backup_error)?;
    Ok(())
}

/// Copy the backup back over the dataset.
pub fn restore_backup(backup_path: &Path, path: &Path) -> Result<(), PersistError> {
    fs::copy(backup_path, path)
        .map(|_| ())
        .map_err(|source| PersistError::Restore {
            path: path.to_path_buf(),
            backup_path: backup_path.to_path_buf(),
            source,
        })
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
