//! Query Analyzer - Extracts keywords and phrases from a question
//!
//! Provides:
//! - Normalization (lowercase, punctuation stripped)
//! - Stopword-filtered keyword extraction
//! - Two- and three-word phrases built from consecutive tokens

use crate::config::RetrievalConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Terms derived from a single question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTerms {
    /// Significant single words
    pub keywords: BTreeSet<String>,

    /// Space-joined runs of 2 or 3 consecutive non-stopword tokens
    pub phrases: BTreeSet<String>,
}

impl QueryTerms {
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Keywords and phrases together, deduplicated
    pub fn terms(&self) -> BTreeSet<&str> {
        self.keywords
            .iter()
            .chain(self.phrases.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Lowercase a question, drop everything but word characters and
/// whitespace, and split into tokens.
pub fn tokenize(question: &str) -> Vec<String> {
    let cleaned: String = question
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Query analyzer bound to a retrieval configuration
pub struct QueryAnalyzer<'a> {
    config: &'a RetrievalConfig,
}

impl<'a> QueryAnalyzer<'a> {
    pub fn new(config: &'a RetrievalConfig) -> Self {
        Self { config }
    }

    /// Derive keywords and phrases from a question
    pub fn analyze(&self, question: &str) -> QueryTerms {
        let tokens = tokenize(question);

        let keywords = tokens
            .iter()
            .filter(|t| t.chars().count() >= self.config.min_keyword_length)
            .filter(|t| !self.config.is_stopword(t))
            .cloned()
            .collect();

        let mut phrases = BTreeSet::new();
        for width in 2..=3 {
            for window in tokens.windows(width) {
                if window.iter().all(|t| !self.config.is_stopword(t)) {
                    phrases.insert(window.join(" "));
                }
            }
        }

        QueryTerms { keywords, phrases }
    }
}
