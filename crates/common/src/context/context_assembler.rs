//! Context Assembler - Builds the grounding context for one question
//!
//! Provides:
//! - Segment → rank → locate pipeline over a single document
//! - Distinct empty-document and no-match outcomes
//! - Retrieval metrics per selection strategy

use super::page_locator::{locate_pages, PageRecord};
use super::ranker::{RankStrategy, Ranker};
use super::segmenter::{join_paragraphs, segment};
use crate::config::RetrievalConfig;
use crate::metrics;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// How the context was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Document had no text
    EmptyDocument,
    /// Ranker selected nothing; context holds the no-match message
    NoMatch,
    HeadingMatch,
    KeywordScore,
    Summary,
    PrefixFallback,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::EmptyDocument => "empty_document",
            SelectionStrategy::NoMatch => "no_match",
            SelectionStrategy::HeadingMatch => "heading_match",
            SelectionStrategy::KeywordScore => "keyword_score",
            SelectionStrategy::Summary => "summary",
            SelectionStrategy::PrefixFallback => "prefix_fallback",
        }
    }
}

impl From<RankStrategy> for SelectionStrategy {
    fn from(strategy: RankStrategy) -> Self {
        match strategy {
            RankStrategy::HeadingMatch => SelectionStrategy::HeadingMatch,
            RankStrategy::KeywordScore => SelectionStrategy::KeywordScore,
            RankStrategy::Summary => SelectionStrategy::Summary,
            RankStrategy::PrefixFallback => SelectionStrategy::PrefixFallback,
            RankStrategy::Empty => SelectionStrategy::NoMatch,
        }
    }
}

/// Context handed to an answer generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResult {
    /// Selected paragraphs joined by a blank line, the no-match message,
    /// or empty for an empty document
    pub context: String,

    /// Pages the selected paragraphs came from, ascending
    pub pages: Vec<u32>,

    /// Branch that produced `context`
    pub strategy: SelectionStrategy,
}

impl ContextResult {
    pub fn empty_document() -> Self {
        Self {
            context: String::new(),
            pages: Vec::new(),
            strategy: SelectionStrategy::EmptyDocument,
        }
    }

    pub fn no_match(question: &str) -> Self {
        Self {
            context: no_match_message(question),
            pages: Vec::new(),
            strategy: SelectionStrategy::NoMatch,
        }
    }

    pub fn is_empty_document(&self) -> bool {
        self.strategy == SelectionStrategy::EmptyDocument
    }

    pub fn is_no_match(&self) -> bool {
        self.strategy == SelectionStrategy::NoMatch
    }
}

/// Sentinel context for a question nothing in the document answers
pub fn no_match_message(question: &str) -> String {
    format!("No specific information found about \"{}\" in the document.", question)
}

/// Runs retrieval for one question against one document
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler {
    config: RetrievalConfig,
}

impl ContextAssembler {
    pub fn new(config: RetrievalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Select context for `question` from `document`, attributing pages
    /// from `pages`
    pub fn assemble(&self, question: &str, document: &str, pages: &[PageRecord]) -> ContextResult {
        let start = Instant::now();

        let result = if document.trim().is_empty() {
            ContextResult::empty_document()
        } else {
            let paragraphs = segment(document);
            let ranking = Ranker::new(&self.config).rank(&paragraphs, question);

            if ranking.is_empty() {
                ContextResult::no_match(question)
            } else {
                ContextResult {
                    context: join_paragraphs(&ranking.paragraphs),
                    pages: locate_pages(
                        &ranking.paragraphs,
                        pages,
                        self.config.page_match_prefix_chars,
                    ),
                    strategy: ranking.strategy.into(),
                }
            }
        };

        debug!(
            strategy = result.strategy.as_str(),
            context_chars = result.context.chars().count(),
            pages = ?result.pages,
            "Context assembled"
        );
        metrics::record_retrieval(
            start.elapsed().as_secs_f64(),
            result.strategy.as_str(),
            result.pages.len(),
        );

        result
    }
}
