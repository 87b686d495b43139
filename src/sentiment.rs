//! Sentiment classes and the spellings accepted for them in the dataset.
//!
//! The dataset stores labels as free text. A [`LabelSet`] decides which raw
//! values count as a valid label after trimming and lower-casing; anything
//! else is treated as absent and becomes a classification target.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three sentiment classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All classes in their canonical order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Stable index of the class inside [`Sentiment::ALL`].
    pub fn index(self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Neutral => 1,
            Sentiment::Negative => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of interpreting one raw sentiment cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelCell {
    /// The cell holds an accepted spelling.
    Valid {
        sentiment: Sentiment,
        /// Normalized (trimmed, lower-cased) spelling found in the cell.
        spelling: String,
    },
    /// The cell is empty or whitespace only.
    Absent,
    /// The cell holds something outside the label set.
    Invalid(String),
}

/// Spellings accepted for each sentiment class.
///
/// The first spelling of every class is its canonical form, used when a
/// prediction has to be written and the training rows give no preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    spellings: BTreeMap<Sentiment, Vec<String>>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::from_spellings([
            (Sentiment::Positive, vec!["positive", "positif"]),
            (Sentiment::Neutral, vec!["neutral", "netral"]),
            (Sentiment::Negative, vec!["negative", "negatif"]),
        ])
    }
}

impl LabelSet {
    /// Build a label set from per-class spellings.
    ///
    /// Spellings are normalized; empty spellings are ignored and a class
    /// without any spelling falls back to its English name.
    pub fn from_spellings<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Sentiment, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut spellings: BTreeMap<Sentiment, Vec<String>> = BTreeMap::new();
        for (sentiment, values) in entries {
            let slot = spellings.entry(sentiment).or_default();
            for value in values {
                let normalized = normalize_label(value.as_ref());
                if !normalized.is_empty() && !slot.contains(&normalized) {
                    slot.push(normalized);
                }
            }
        }
        for sentiment in Sentiment::ALL {
            let slot = spellings.entry(sentiment).or_default();
            if slot.is_empty() {
                slot.push(sentiment.as_str().to_string());
            }
        }
        Self { spellings }
    }

    /// Interpret a raw cell value.
    pub fn classify_cell(&self, raw: &str) -> LabelCell {
        let normalized = normalize_label(raw);
        if normalized.is_empty() {
            return LabelCell::Absent;
        }
        match self.parse_normalized(&normalized) {
            Some(sentiment) => LabelCell::Valid {
                sentiment,
                spelling: normalized,
            },
            None => LabelCell::Invalid(normalized),
        }
    }

    /// Parse a raw value, returning `None` for absent or unknown labels.
    pub fn parse(&self, raw: &str) -> Option<Sentiment> {
        self.parse_normalized(&normalize_label(raw))
    }

    /// Canonical spelling for a class.
    pub fn canonical(&self, sentiment: Sentiment) -> &str {
        self.spellings
            .get(&sentiment)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or(sentiment.as_str())
    }

    pub fn spellings(&self, sentiment: Sentiment) -> &[String] {
        self.spellings
            .get(&sentiment)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn parse_normalized(&self, normalized: &str) -> Option<Sentiment> {
        self.spellings
            .iter()
            .find(|(_, values)| values.iter().any(|value| value == normalized))
            .map(|(sentiment, _)| *sentiment)
    }
}

/// Trim and lower-case a raw label.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}
