//! Split of a table into training rows and classification targets.

use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::CommentTable;
use crate::sentiment::{LabelCell, LabelSet, Sentiment};

/// A row whose sentiment cell holds an accepted spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRow {
    pub index: usize,
    pub sentiment: Sentiment,
    /// Normalized spelling found in the cell.
    pub spelling: String,
}

/// A row whose sentiment cell held something outside the label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLabel {
    pub index: usize,
    pub value: String,
}

/// Disjoint labeled and unlabeled row sets, in file order.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub labeled: Vec<LabeledRow>,
    /// Rows with an absent or invalid label.
    pub unlabeled: Vec<usize>,
    /// Subset of `unlabeled` that carried an unrecognized value.
    pub invalid: Vec<InvalidLabel>,
}

impl Partition {
    pub fn split(table: &CommentTable, labels: &LabelSet) -> Self {
        let mut partition = Partition::default();
        for row in table.rows() {
            match labels.classify_cell(row.sentiment_raw()) {
                LabelCell::Valid {
                    sentiment,
                    spelling,
                } => partition.labeled.push(LabeledRow {
                    index: row.index(),
                    sentiment,
                    spelling,
                }),
                LabelCell::Absent => partition.unlabeled.push(row.index()),
                LabelCell::Invalid(value) => {
                    partition.unlabeled.push(row.index());
                    partition.invalid.push(InvalidLabel {
                        index: row.index(),
                        value,
                    });
                }
            }
        }
        partition
    }

    /// Distinct unrecognized values, sorted.
    pub fn invalid_values(&self) -> Vec<&str> {
        self.invalid
            .iter()
            .map(|invalid| invalid.value.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Spelling to write for each class, following the training rows.
    ///
    /// The most frequent spelling wins; on a tie the one listed first in the
    /// label set (the canonical spelling) is used.
    pub fn preferred_spellings(&self, labels: &LabelSet) -> BTreeMap<Sentiment, String> {
        let mut counts: BTreeMap<(Sentiment, &str), usize> = BTreeMap::new();
        for row in &self.labeled {
            *counts.entry((row.sentiment, row.spelling.as_str())).or_default() += 1;
        }
        Sentiment::ALL
            .into_iter()
            .map(|sentiment| {
                let mut best = labels.canonical(sentiment);
                let mut best_count = 0usize;
                for spelling in labels.spellings(sentiment) {
                    let count = counts
                        .get(&(sentiment, spelling.as_str()))
                        .copied()
                        .unwrap_or(0);
                    if count > best_count {
                        best = spelling.as_str();
                        best_count = count;
                    }
                }
                (sentiment, best.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnCandidates;
    use csv::StringRecord;

    fn table(labels: &[&str]) -> CommentTable {
        let records = labels
            .iter()
            .map(|label| StringRecord::from(vec!["some comment", *label]))
            .collect();
        CommentTable::new(
            StringRecord::from(vec!["komentar", "sentimen"]),
            records,
            &ColumnCandidates::default(),
        )
        .unwrap()
    }

    #[test]
    fn splits_valid_absent_and_invalid_rows() {
        let partition = Partition::split(
            &table(&["positif", "", "Happy", " NEGATIVE ", "??", "happy"]),
            &LabelSet::default(),
        );
        let labeled: Vec<usize> = partition.labeled.iter().map(|row| row.index).collect();
        assert_eq!(labeled, vec![0, 3]);
        assert_eq!(partition.unlabeled, vec![1, 2, 4, 5]);
        assert_eq!(partition.invalid.len(), 3);
        assert_eq!(partition.invalid_values(), vec!["??", "happy"]);
    }

    #[test]
    fn preferred_spelling_follows_training_rows() {
        let labels = LabelSet::default();
        let partition = Partition::split(
            &table(&["positif", "Positif", "positive", "negative", "negatif"]),
            &labels,
        );
        let spellings = partition.preferred_spellings(&labels);
        assert_eq!(spellings[&Sentiment::Positive], "positif");
        // Tie goes to the canonical spelling.
        assert_eq!(spellings[&Sentiment::Negative], "negative");
        // Unseen classes fall back to the canonical spelling.
        assert_eq!(spellings[&Sentiment::Neutral], "neutral");
    }
}
