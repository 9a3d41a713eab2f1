//! Relevance Retrieval Engine
//!
//! Locates the passages of one document most likely to answer a question:
//! - Paragraph segmentation
//! - Keyword and phrase extraction
//! - Heading-match and keyword-score ranking
//! - Page attribution
//! - Context assembly
//!
//! Everything here is synchronous and allocation-local; calls share no
//! state and can run concurrently.

mod segmenter;
mod query_analyzer;
mod ranker;
mod page_locator;
mod context_assembler;

pub use segmenter::{segment, join_paragraphs, truncate_chars, Paragraph};
pub use query_analyzer::{tokenize, QueryAnalyzer, QueryTerms};
pub use ranker::{Ranker, Ranking, RankStrategy, ScoredParagraph};
pub use page_locator::{locate_pages, PageRecord};
pub use context_assembler::{no_match_message, ContextAssembler, ContextResult, SelectionStrategy};
