//! TF-IDF bag-of-n-grams vectorizer producing sparse rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Sparse feature row: `(column, weight)` pairs sorted by column.
pub type SparseRow = Vec<(usize, f64)>;

/// Vectorizer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfOptions {
    /// Smallest n-gram length.
    pub ngram_min: usize,
    /// Largest n-gram length (inclusive).
    pub ngram_max: usize,
    /// Terms seen in fewer documents are dropped.
    pub min_df: usize,
    /// Terms seen in more than this fraction of documents are dropped.
    pub max_df: f64,
    /// Use `1 + ln(tf)` instead of raw counts.
    pub sublinear_tf: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 2,
            min_df: 2,
            max_df: 0.95,
            sublinear_tf: true,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum VocabularyError {
    #[error("No documents to fit the vocabulary on")]
    NoDocuments,
    #[error("Invalid n-gram range {min}..={max}")]
    InvalidNgramRange { min: usize, max: usize },
    #[error(
        "max_df of {max_df} keeps fewer documents ({max_doc_count}) than min_df ({min_df}) requires"
    )]
    InconsistentDocumentFrequency {
        max_df: f64,
        max_doc_count: usize,
        min_df: usize,
    },
    #[error("No terms remain after pruning {candidates} candidate terms over {documents} documents")]
    Empty { candidates: usize, documents: usize },
}

/// Fitted vectorizer: sorted vocabulary plus per-term idf.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    options: TfidfOptions,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S], options: &TfidfOptions) -> Result<Self, VocabularyError> {
        if options.ngram_min == 0 || options.ngram_min > options.ngram_max {
            return Err(VocabularyError::InvalidNgramRange {
                min: options.ngram_min,
                max: options.ngram_max,
            });
        }
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(VocabularyError::NoDocuments);
        }
        let max_doc_count = (options.max_df * n_docs as f64).floor() as usize;
        if max_doc_count < options.min_df {
            return Err(VocabularyError::InconsistentDocumentFrequency {
                max_df: options.max_df,
                max_doc_count,
                min_df: options.min_df,
            });
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = ngrams(doc.as_ref(), options).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }
        let candidates = document_frequency.len();
        let terms: Vec<String> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= options.min_df && **df <= max_doc_count)
            .map(|(term, _)| term.clone())
            .collect();
        if terms.is_empty() {
            return Err(VocabularyError::Empty {
                candidates,
                documents: n_docs,
            });
        }
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Ok(Self {
            options: options.clone(),
            vocabulary,
            terms,
            idf,
        })
    }

    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    /// Term for a feature column.
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// L2-normalized tf-idf row for one document; unknown terms are ignored.
    pub fn transform_one(&self, document: &str) -> SparseRow {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for term in ngrams(document, &self.options) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_default() += 1;
            }
        }
        let mut row: SparseRow = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.options.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (column, tf * self.idf[column])
            })
            .collect();
        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut row {
                *weight /= norm;
            }
        }
        row
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseRow> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }
}

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token regex must compile"))
}

/// Tokens of two or more word characters, expanded into space-joined n-grams.
fn ngrams(document: &str, options: &TfidfOptions) -> Vec<String> {
    let tokens: Vec<&str> = token_pattern()
        .find_iter(document)
        .map(|m| m.as_str())
        .collect();
    let mut out = Vec::new();
    for n in options.ngram_min..=options.ngram_max {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "great show tonight",
            "great show again",
            "bad sound tonight",
            "bad sound again",
        ]
    }

    #[test]
    fn prunes_rare_terms_and_keeps_bigrams() {
        let vectorizer = TfidfVectorizer::fit(&docs(), &TfidfOptions::default()).unwrap();
        let terms: Vec<&str> = (0..vectorizer.n_features())
            .filter_map(|c| vectorizer.term(c))
            .collect();
        assert_eq!(
            terms,
            vec!["again", "bad", "bad sound", "great", "great show", "show", "sound", "tonight"]
        );
    }

    #[test]
    fn drops_terms_present_in_almost_every_document() {
        let documents = vec!["fans love it", "fans hate it", "fans meh it", "fans love"];
        let options = TfidfOptions {
            ngram_max: 1,
            ..TfidfOptions::default()
        };
        let vectorizer = TfidfVectorizer::fit(&documents, &options).unwrap();
        // "fans" is in 4/4 docs (> 0.95 * 4 = 3.8); "it" in 3/4 survives.
        let terms: Vec<&str> = (0..vectorizer.n_features())
            .filter_map(|c| vectorizer.term(c))
            .collect();
        assert_eq!(terms, vec!["it", "love"]);
    }

    #[test]
    fn rows_are_unit_length_and_ignore_unknown_terms() {
        let vectorizer = TfidfVectorizer::fit(&docs(), &TfidfOptions::default()).unwrap();
        let row = vectorizer.transform_one("great great show unheard");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(vectorizer.transform_one("nothing known here").is_empty());
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let documents = vec!["one", "two", "three"];
        let err = TfidfVectorizer::fit(&documents, &TfidfOptions::default()).unwrap_err();
        assert!(matches!(err, VocabularyError::Empty { documents: 3, .. }));
    }
}
