//! In-memory view of the comment dataset.

use std::collections::BTreeMap;

use csv::StringRecord;

use super::DatasetError;

/// Header names accepted for each logical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCandidates {
    pub comment: Vec<String>,
    pub sentiment: Vec<String>,
    pub date: Vec<String>,
    pub platform: Vec<String>,
    pub likes: Vec<String>,
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        let names = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        Self {
            comment: names(&["komentar", "comment"]),
            sentiment: names(&["sentimen", "sentiment"]),
            date: names(&["tanggal", "date"]),
            platform: names(&["platform"]),
            likes: names(&["likes"]),
        }
    }
}

/// Resolved column positions for a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub comment: usize,
    pub sentiment: usize,
    pub date: Option<usize>,
    pub platform: Option<usize>,
    pub likes: Option<usize>,
}

impl ColumnLayout {
    /// Resolve column positions, failing when a required column is missing.
    pub fn resolve(headers: &StringRecord, candidates: &ColumnCandidates) -> Result<Self, DatasetError> {
        let find = |names: &[String]| {
            headers
                .iter()
                .position(|header| names.iter().any(|name| name == header))
        };
        let comment = find(&candidates.comment);
        let sentiment = find(&candidates.sentiment);
        let mut missing = Vec::new();
        if comment.is_none() {
            missing.push("comment");
        }
        if sentiment.is_none() {
            missing.push("sentiment");
        }
        match (comment, sentiment) {
            (Some(comment), Some(sentiment)) => Ok(Self {
                comment,
                sentiment,
                date: find(&candidates.date),
                platform: find(&candidates.platform),
                likes: find(&candidates.likes),
            }),
            _ => Err(DatasetError::MissingColumns {
                missing: missing.into_iter().map(str::to_string).collect(),
                found: headers.iter().map(str::to_string).collect(),
            }),
        }
    }
}

/// Record terminator used by a dataset file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// Byte-level layout details that must survive a rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileFormat {
    /// File starts with a UTF-8 byte order mark.
    pub bom: bool,
    pub line_ending: LineEnding,
}

/// Header plus raw records, kept verbatim so untouched rows round-trip unchanged.
#[derive(Debug, Clone)]
pub struct CommentTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
    layout: ColumnLayout,
    format: FileFormat,
}

impl CommentTable {
    pub fn new(
        headers: StringRecord,
        records: Vec<StringRecord>,
        candidates: &ColumnCandidates,
    ) -> Result<Self, DatasetError> {
        let layout = ColumnLayout::resolve(&headers, candidates)?;
        Ok(Self {
            headers,
            records,
            layout,
            format: FileFormat::default(),
        })
    }

    /// Same table, written back with `format`.
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<CommentRow<'_>> {
        self.records.get(index).map(|record| CommentRow {
            index,
            record,
            layout: &self.layout,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CommentRow<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| CommentRow {
                index,
                record,
                layout: &self.layout,
            })
    }

    /// Build a new table whose sentiment cells are replaced for the given rows.
    ///
    /// Rows not present in `updates` are copied unchanged; row order is kept.
    pub fn with_sentiments(&self, updates: &BTreeMap<usize, String>) -> CommentTable {
        let sentiment_col = self.layout.sentiment;
        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| match updates.get(&index) {
                Some(label) => record
                    .iter()
                    .enumerate()
                    .map(|(col, field)| if col == sentiment_col { label.as_str() } else { field })
                    .collect::<StringRecord>(),
                None => record.clone(),
            })
            .collect();
        CommentTable {
            headers: self.headers.clone(),
            records,
            layout: self.layout,
            format: self.format,
        }
    }
}

/// Borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct CommentRow<'a> {
    index: usize,
    record: &'a StringRecord,
    layout: &'a ColumnLayout,
}

impl<'a> CommentRow<'a> {
    /// Position of the row in file order (header excluded).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn comment(&self) -> &'a str {
        self.record.get(self.layout.comment).unwrap_or_default()
    }

    /// Raw sentiment cell, exactly as stored.
    pub fn sentiment_raw(&self) -> &'a str {
        self.record.get(self.layout.sentiment).unwrap_or_default()
    }

    pub fn date(&self) -> Option<&'a str> {
        self.layout.date.and_then(|col| self.record.get(col))
    }

    pub fn platform(&self) -> Option<&'a str> {
        self.layout.platform.and_then(|col| self.record.get(col))
    }

    pub fn likes(&self) -> Option<i64> {
        self.layout
            .likes
            .and_then(|col| self.record.get(col))
            .and_then(|value| value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn resolves_indonesian_headers() {
        let layout = ColumnLayout::resolve(
            &header(&["tanggal", "platform", "komentar", "likes", "sentimen"]),
            &ColumnCandidates::default(),
        )
        .unwrap();
        assert_eq!(layout.comment, 2);
        assert_eq!(layout.sentiment, 4);
        assert_eq!(layout.date, Some(0));
        assert_eq!(layout.likes, Some(3));
    }

    #[test]
    fn reports_every_missing_required_column() {
        let err = ColumnLayout::resolve(&header(&["text", "label"]), &ColumnCandidates::default())
            .unwrap_err();
        match err {
            DatasetError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["comment", "sentiment"]);
                assert_eq!(found, vec!["text", "label"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn with_sentiments_only_touches_listed_rows() {
        let table = CommentTable::new(
            header(&["comment", "sentiment", "likes"]),
            vec![
                StringRecord::from(vec!["great show", "Positive ", "3"]),
                StringRecord::from(vec!["meh", "", "x"]),
            ],
            &ColumnCandidates::default(),
        )
        .unwrap();
        let updates = BTreeMap::from([(1usize, "neutral".to_string())]);
        let merged = table.with_sentiments(&updates);
        assert_eq!(merged.row(0).unwrap().sentiment_raw(), "Positive ");
        assert_eq!(merged.row(1).unwrap().sentiment_raw(), "neutral");
        assert_eq!(merged.row(0).unwrap().likes(), Some(3));
        assert_eq!(merged.row(1).unwrap().likes(), None);
        assert_eq!(table.row(1).unwrap().sentiment_raw(), "");
    }

    #[test]
    fn with_sentiments_keeps_file_format() {
        let format = FileFormat {
            bom: true,
            line_ending: LineEnding::CrLf,
        };
        let table = CommentTable::new(
            header(&["comment", "sentiment"]),
            vec![StringRecord::from(vec!["meh", ""])],
            &ColumnCandidates::default(),
        )
        .unwrap()
        .with_format(format);
        let merged = table.with_sentiments(&BTreeMap::from([(0usize, "neutral".to_string())]));
        assert_eq!(merged.format(), format);
    }
}
