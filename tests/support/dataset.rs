use std::path::{Path, PathBuf};

use sentimen::dataset::{CommentTable, PersistError, TableWriter};
use tempfile::TempDir;

const HEADER: &str = "\"tanggal\",\"platform\",\"komentar\",\"likes\",\"sentimen\"\n";

/// Render `(comment, sentiment)` pairs as a fully quoted dataset file.
pub fn csv_text(rows: &[(&str, &str)]) -> String {
    let mut out = String::from(HEADER);
    for (idx, (comment, sentiment)) in rows.iter().enumerate() {
        let platform = if idx % 2 == 0 { "Twitter" } else { "Instagram" };
        out.push_str(&format!(
            "\"2024-01-{:02}\",\"{platform}\",\"{comment}\",\"{}\",\"{sentiment}\"\n",
            idx % 28 + 1,
            idx * 3
        ));
    }
    out
}

/// A dataset file inside its own temporary directory.
pub struct DatasetFixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl DatasetFixture {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join("hasil.csv");
        std::fs::write(&path, contents).expect("write dataset");
        Self { _dir: dir, path }
    }

    /// A path in the fixture directory that does not exist.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join("hasil.csv");
        Self { _dir: dir, path }
    }

    pub fn dir(&self) -> &Path {
        self._dir.path()
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).expect("read dataset")
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir().join("hasil.csv.bak")
    }

    /// Raw sentiment cell of every row, in file order.
    pub fn sentiments(&self) -> Vec<String> {
        let mut reader = csv::Reader::from_path(&self.path).expect("open dataset");
        reader
            .records()
            .map(|record| record.expect("parse row")[4].to_string())
            .collect()
    }
}

/// Leaves the destination half written and then reports failure.
pub struct FailingWriter;

impl TableWriter for FailingWriter {
    fn write_table(&self, _table: &CommentTable, dest: &Path) -> Result<(), PersistError> {
        std::fs::write(dest, "\"tanggal\",\"platform\"\n\"2024-01-").map_err(|source| {
            PersistError::Write {
                path: dest.to_path_buf(),
                source,
            }
        })?;
        Err(PersistError::Write {
            path: dest.to_path_buf(),
            source: std::io::Error::other("simulated write failure"),
        })
    }
}

pub const POSITIVE_COMMENTS: [&str; 6] = [
    "great concert loved it so much",
    "loved the great vocals",
    "amazing concert great vibes",
    "loved the amazing vibes",
    "great great amazing",
    "amazing vocals loved them",
];

pub const NEGATIVE_COMMENTS: [&str; 6] = [
    "terrible sound awful crowd",
    "awful organisation terrible queue",
    "boring set terrible sound",
    "awful boring night",
    "terrible terrible boring",
    "awful queue boring crowd",
];

/// Six positive and six negative rows with disjoint vocabulary.
pub fn twelve_labeled() -> Vec<(&'static str, &'static str)> {
    POSITIVE_COMMENTS
        .iter()
        .map(|c| (*c, "positive"))
        .chain(NEGATIVE_COMMENTS.iter().map(|c| (*c, "negative")))
        .collect()
}
