//! Comment cleaning pipeline.
//!
//! Steps run in the configured order; the default order matters because
//! later steps see the output of earlier ones (URLs must go before
//! punctuation stripping splits them into words).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single cleaning transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanStep {
    Lowercase,
    StripUrls,
    StripMentions,
    StripHashtags,
    StripDigits,
    StripNonAscii,
    StripPunctuation,
    CollapseWhitespace,
    Trim,
}

impl CleanStep {
    /// Default step order.
    pub const DEFAULT_ORDER: [CleanStep; 9] = [
        CleanStep::Lowercase,
        CleanStep::StripUrls,
        CleanStep::StripMentions,
        CleanStep::StripHashtags,
        CleanStep::StripDigits,
        CleanStep::StripNonAscii,
        CleanStep::StripPunctuation,
        CleanStep::CollapseWhitespace,
        CleanStep::Trim,
    ];

    fn apply(self, text: String) -> String {
        match self {
            CleanStep::Lowercase => text.to_lowercase(),
            CleanStep::StripUrls => strip(&patterns().url, text),
            CleanStep::StripMentions => strip(&patterns().mention, text),
            CleanStep::StripHashtags => strip(&patterns().hashtag, text),
            CleanStep::StripDigits => strip(&patterns().digits, text),
            CleanStep::StripNonAscii => text.chars().filter(char::is_ascii).collect(),
            CleanStep::StripPunctuation => text
                .chars()
                .filter(|ch| !ch.is_ascii_punctuation())
                .collect(),
            CleanStep::CollapseWhitespace => patterns()
                .whitespace
                .replace_all(&text, " ")
                .into_owned(),
            CleanStep::Trim => text.trim().to_string(),
        }
    }
}

struct Patterns {
    url: Regex,
    mention: Regex,
    hashtag: Regex,
    digits: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("clean regex must compile");
        Patterns {
            url: compile(r"(?:http|www)\S+"),
            mention: compile(r"@\w+"),
            hashtag: compile(r"#\w+"),
            digits: compile(r"\d+"),
            whitespace: compile(r"\s+"),
        }
    })
}

fn strip(regex: &Regex, text: String) -> String {
    match regex.replace_all(&text, "") {
        std::borrow::Cow::Borrowed(_) => text,
        std::borrow::Cow::Owned(replaced) => replaced,
    }
}

/// Ordered list of cleaning steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCleaner {
    steps: Vec<CleanStep>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(CleanStep::DEFAULT_ORDER.to_vec())
    }
}

impl TextCleaner {
    pub fn new(steps: Vec<CleanStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[CleanStep] {
        &self.steps
    }

    /// Run every step over `raw` in order.
    pub fn clean(&self, raw: &str) -> String {
        self.steps
            .iter()
            .fold(raw.to_string(), |text, step| step.apply(text))
    }
}

/// Clean a comment with the default step order.
pub fn clean_text(raw: &str) -> String {
    TextCleaner::default().clean(raw)
}
