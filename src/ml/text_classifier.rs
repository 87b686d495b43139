//! Text classifier combining the tf-idf vectorizer with Naive Bayes.

use crate::ml::ModelError;
use crate::ml::naive_bayes::{MultinomialNb, TrainDataset, TrainOptions, train_naive_bayes};
use crate::ml::tfidf::{TfidfOptions, TfidfVectorizer};
use crate::sentiment::Sentiment;

/// Hyperparameters for the full text pipeline.
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub tfidf: TfidfOptions,
    pub naive_bayes: TrainOptions,
}

/// A single prediction with the posterior of the chosen class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

/// Vectorizer and classifier fitted on the same cleaned documents.
#[derive(Debug, Clone)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl SentimentModel {
    /// Fit on already-cleaned documents.
    pub fn fit<S: AsRef<str>>(
        documents: &[S],
        labels: &[Sentiment],
        options: &ModelOptions,
    ) -> Result<Self, ModelError> {
        if documents.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if documents.len() != labels.len() {
            return Err(ModelError::MismatchedInputs {
                rows: documents.len(),
                labels: labels.len(),
            });
        }
        let vectorizer = TfidfVectorizer::fit(documents, &options.tfidf)?;
        let dataset = TrainDataset {
            x: vectorizer.transform(documents),
            y: labels.to_vec(),
            n_features: vectorizer.n_features(),
        };
        let classifier = train_naive_bayes(&dataset, &options.naive_bayes)?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn predict(&self, document: &str) -> Prediction {
        let row = self.vectorizer.transform_one(document);
        let proba = self.classifier.predict_proba(&row);
        let sentiment = self.classifier.predict(&row);
        let confidence = self
            .classifier
            .classes
            .iter()
            .position(|class| *class == sentiment)
            .and_then(|idx| proba.get(idx).copied())
            .unwrap_or(0.0);
        Prediction {
            sentiment,
            confidence,
        }
    }

    pub fn predict_batch<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Prediction> {
        documents
            .iter()
            .map(|doc| self.predict(doc.as_ref()))
            .collect()
    }

    /// Classes the model can output.
    pub fn classes(&self) -> &[Sentiment] {
        &self.classifier.classes
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Highest-probability terms for a class.
    pub fn informative_terms(&self, class: Sentiment, n: usize) -> Vec<(String, f64)> {
        self.classifier
            .top_features(class, n)
            .into_iter()
            .filter_map(|(column, log_prob)| {
                self.vectorizer
                    .term(column)
                    .map(|term| (term.to_string(), log_prob))
            })
            .collect()
    }
}
