//! JSON run report written by the `sentimen` binary on request.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::errors::LabelerError;
use super::labeler::LabelingOutcome;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize report {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
pub struct ReportedError {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub dataset: PathBuf,
    pub finished_at: Option<String>,
    pub outcome: Option<LabelingOutcome>,
    pub error: Option<ReportedError>,
}

impl RunReport {
    pub fn from_result(dataset: &Path, result: &Result<LabelingOutcome, LabelerError>) -> Self {
        let finished_at = OffsetDateTime::now_utc().format(&Rfc3339).ok();
        match result {
            Ok(outcome) => Self {
                success: true,
                dataset: dataset.to_path_buf(),
                finished_at,
                outcome: Some(outcome.clone()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                dataset: dataset.to_path_buf(),
                finished_at,
                outcome: None,
                error: Some(ReportedError {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            },
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let write_error = |source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            ReportError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(write_error)?;
        writer.flush().map_err(write_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn failed_run_reports_error_kind() {
        let dir = tempdir().unwrap();
        let dataset = dir.path().join("missing.csv");
        let result = Err(LabelerError::NotFound {
            path: dataset.clone(),
        });
        let report = RunReport::from_result(&dataset, &result);
        let path = dir.path().join("reports/run.json");
        report.write_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["kind"], "NotFoundError");
        assert!(value["outcome"].is_null());
    }
}
