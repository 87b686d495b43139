//! Semi-supervised sentiment labeling of the comment dataset.
//!
//! A run trains a tf-idf + Naive Bayes model on the rows that already carry a
//! valid sentiment and writes predictions into the rows that do not. Failures
//! are reported as [`LabelerError`] and leave the dataset untouched.

mod config;
pub mod diagnostics;
mod errors;
mod labeler;
pub mod partition;
pub mod report;

pub use config::LabelerConfig;
pub use errors::{LabelerError, RestoreStatus};
pub use labeler::{LabelingOutcome, RunStatus, SentimentLabeler, log_result, run_classifier};
pub use partition::Partition;
pub use report::{ReportError, RunReport};
