//! Aggregate counts over a labeled dataset.
//!
//! These are the figures the dashboard shows: totals per sentiment, per
//! platform and per day, optionally narrowed to one platform or sentiment.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{CommentRow, CommentTable};
use crate::sentiment::{LabelSet, Sentiment};

const UNKNOWN_PLATFORM: &str = "unknown";

/// Row filter mirroring the dashboard query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    /// Exact platform name.
    pub platform: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl SummaryFilter {
    fn matches(&self, row: &CommentRow<'_>, sentiment: Option<Sentiment>) -> bool {
        if let Some(platform) = &self.platform
            && row.platform() != Some(platform.as_str())
        {
            return false;
        }
        match self.sentiment {
            Some(wanted) => sentiment == Some(wanted),
            None => true,
        }
    }
}

/// Per-sentiment counts plus rows without a usable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub unlabeled: usize,
}

impl SentimentCounts {
    fn add(&mut self, sentiment: Option<Sentiment>) {
        match sentiment {
            Some(Sentiment::Positive) => self.positive += 1,
            Some(Sentiment::Neutral) => self.neutral += 1,
            Some(Sentiment::Negative) => self.negative += 1,
            None => self.unlabeled += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative + self.unlabeled
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub sentiments: SentimentCounts,
    pub platforms: BTreeMap<String, SentimentCounts>,
    /// Keyed by the raw date cell; rows without a date are not counted here.
    pub daily: BTreeMap<String, SentimentCounts>,
}

pub fn summarize(table: &CommentTable, labels: &LabelSet, filter: &SummaryFilter) -> DatasetSummary {
    let mut summary = DatasetSummary::default();
    for row in table.rows() {
        let sentiment = labels.parse(row.sentiment_raw());
        if !filter.matches(&row, sentiment) {
            continue;
        }
        summary.total += 1;
        summary.sentiments.add(sentiment);
        let platform = row
            .platform()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_PLATFORM);
        summary
            .platforms
            .entry(platform.to_string())
            .or_default()
            .add(sentiment);
        if let Some(date) = row.date().map(str::trim).filter(|value| !value.is_empty()) {
            summary.daily.entry(date.to_string()).or_default().add(sentiment);
        }
    }
    summary
}
