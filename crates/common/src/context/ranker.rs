//! Relevance Ranker - Orders paragraphs by how well they answer a question
//!
//! Two stages, in strict precedence:
//! 1. Exact topic-heading match on the whole question ("1. Bots:" for "bots")
//! 2. Keyword frequency, keyword coverage and phrase bonuses
//!
//! Stage 2 falls back to a bounded document prefix for summarization
//! requests, keyword-less questions, and questions no paragraph scores for.

use super::query_analyzer::{QueryAnalyzer, QueryTerms};
use super::segmenter::{join_paragraphs, truncate_chars, Paragraph};
use crate::config::RetrievalConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which branch of the ranker produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStrategy {
    /// Paragraphs carrying the question as a heading
    HeadingMatch,
    /// Top paragraphs by keyword score
    KeywordScore,
    /// Leading slice of the document for a summarization request
    Summary,
    /// Leading slice of the document when nothing targeted matched
    PrefixFallback,
    /// Nothing to rank
    Empty,
}

impl RankStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankStrategy::HeadingMatch => "heading_match",
            RankStrategy::KeywordScore => "keyword_score",
            RankStrategy::Summary => "summary",
            RankStrategy::PrefixFallback => "prefix_fallback",
            RankStrategy::Empty => "empty",
        }
    }
}

/// Ranked paragraphs, most relevant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub strategy: RankStrategy,
    pub paragraphs: Vec<Paragraph>,
}

impl Ranking {
    fn empty() -> Self {
        Self {
            strategy: RankStrategy::Empty,
            paragraphs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// A paragraph with its stage-2 score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredParagraph<'p> {
    pub paragraph: &'p Paragraph,
    pub score: u32,
}

/// Paragraph ranker bound to a retrieval configuration
pub struct Ranker<'a> {
    config: &'a RetrievalConfig,
}

impl<'a> Ranker<'a> {
    pub fn new(config: &'a RetrievalConfig) -> Self {
        Self { config }
    }

    /// Rank paragraphs against a question.
    ///
    /// Empty input, either side, yields an empty ranking.
    pub fn rank(&self, paragraphs: &[Paragraph], question: &str) -> Ranking {
        let needle = question.trim().to_lowercase();
        if paragraphs.is_empty() || needle.is_empty() {
            return Ranking::empty();
        }

        let headings = self.heading_matches(paragraphs, &needle);
        if !headings.is_empty() {
            debug!(matched = headings.len(), "Heading match");
            return Ranking {
                strategy: RankStrategy::HeadingMatch,
                paragraphs: headings,
            };
        }

        // Summarization wins over the keyword-count check
        if self.config.is_summary_request(question) {
            debug!("Summarization request");
            return self.prefix(
                paragraphs,
                self.config.summary_fallback_chars,
                RankStrategy::Summary,
            );
        }

        let terms = QueryAnalyzer::new(self.config).analyze(question);
        if !terms.has_keywords() {
            debug!("No keywords in question");
            return self.prefix(
                paragraphs,
                self.config.prefix_fallback_chars,
                RankStrategy::PrefixFallback,
            );
        }

        let top: Vec<Paragraph> = self
            .score_all(paragraphs, &terms)
            .into_iter()
            .filter(|s| s.score > 0)
            .take(self.config.top_k_paragraphs)
            .map(|s| s.paragraph.clone())
            .collect();

        if top.is_empty() {
            debug!(keywords = terms.keywords.len(), "No paragraph scored");
            return self.prefix(
                paragraphs,
                self.config.prefix_fallback_chars,
                RankStrategy::PrefixFallback,
            );
        }

        debug!(
            keywords = terms.keywords.len(),
            phrases = terms.phrases.len(),
            kept = top.len(),
            "Keyword scoring"
        );

        Ranking {
            strategy: RankStrategy::KeywordScore,
            paragraphs: top,
        }
    }

    /// Paragraphs where the question appears as a heading, in document order
    fn heading_matches(&self, paragraphs: &[Paragraph], needle: &str) -> Vec<Paragraph> {
        let pattern = format!(
            r"(?:^|\n|\d+\.\s*|[•*]\s*){}\b[:\s]",
            regex_lite::escape(needle)
        );

        let heading = match regex_lite::Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!(error = %e, "Heading pattern rejected, skipping heading match");
                return Vec::new();
            }
        };

        paragraphs
            .iter()
            .filter(|p| heading.is_match(&p.text.to_lowercase()))
            .cloned()
            .collect()
    }

    /// Score every paragraph, highest first, ties in document order
    pub fn score_all<'p>(
        &self,
        paragraphs: &'p [Paragraph],
        terms: &QueryTerms,
    ) -> Vec<ScoredParagraph<'p>> {
        let mut scored: Vec<ScoredParagraph<'p>> = paragraphs
            .iter()
            .map(|paragraph| ScoredParagraph {
                paragraph,
                score: self.score(&paragraph.text, terms),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Keyword occurrences, plus a bonus per distinct keyword present, plus
    /// phrase bonuses when enabled
    pub fn score(&self, text: &str, terms: &QueryTerms) -> u32 {
        let haystack = text.to_lowercase();
        let mut score = 0u32;

        for keyword in &terms.keywords {
            let occurrences = haystack.matches(keyword.as_str()).count() as u32;
            if occurrences > 0 {
                score += occurrences + self.config.keyword_overlap_bonus;
            }
        }

        if self.config.phrase_bonus_enabled {
            for phrase in &terms.phrases {
                if haystack.contains(phrase.as_str()) {
                    let words = phrase.split_whitespace().count() as u32;
                    score += self.config.phrase_word_bonus * words;
                }
            }
        }

        score
    }

    fn prefix(&self, paragraphs: &[Paragraph], max_chars: usize, strategy: RankStrategy) -> Ranking {
        let joined = join_paragraphs(paragraphs);
        let text = truncate_chars(&joined, max_chars).to_string();

        Ranking {
            strategy,
            paragraphs: vec![Paragraph::new(0, text)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KEYWORD_OVERLAP_BONUS, TOP_K_PARAGRAPHS};
    use crate::context::segmenter::segment;

    fn rank(text: &str, question: &str) -> Ranking {
        let config = RetrievalConfig::default();
        Ranker::new(&config).rank(&segment(text), question)
    }

    fn texts(ranking: &Ranking) -> Vec<&str> {
        ranking.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_heading_match_takes_precedence() {
        let doc = "Everywhere you look: bots, more bots, bots and bots all day.\n\n\
                   1. Bots: automated programs that act on a user's behalf.\n\n\
                   2. Crawlers: bots that index pages.";
        let ranking = rank(doc, "bots");

        assert_eq!(ranking.strategy, RankStrategy::HeadingMatch);
        assert_eq!(
            texts(&ranking),
            vec!["1. Bots: automated programs that act on a user's behalf."]
        );
    }

    #[test]
    fn test_heading_match_markers() {
        let config = RetrievalConfig::default();
        let ranker = Ranker::new(&config);
        let paragraphs = vec![
            Paragraph::new(0, "Bots: at paragraph start"),
            Paragraph::new(1, "Intro\nBots are listed here"),
            Paragraph::new(2, "• Bots: bullet"),
            Paragraph::new(3, "*Bots\tstar bullet"),
            Paragraph::new(4, "Robots: not a heading for bots"),
            Paragraph::new(5, "Botswana: whole word only"),
        ];

        let ranking = ranker.rank(&paragraphs, "  Bots ");
        let positions: Vec<usize> = ranking.paragraphs.iter().map(|p| p.position).collect();
        assert_eq!(ranking.strategy, RankStrategy::HeadingMatch);
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_keyword_scoring_orders_by_score() {
        let doc = "The weather is mild.\n\n\
                   Refund requests are processed weekly.\n\n\
                   Our refund policy: a refund is issued within 30 days of purchase.\n\n\
                   Shipping takes five days.";
        let ranking = rank(doc, "What is the refund policy?");

        assert_eq!(ranking.strategy, RankStrategy::KeywordScore);
        assert_eq!(
            texts(&ranking),
            vec![
                "Our refund policy: a refund is issued within 30 days of purchase.",
                "Refund requests are processed weekly.",
            ]
        );
    }

    #[test]
    fn test_score_components() {
        let config = RetrievalConfig::default();
        let ranker = Ranker::new(&config);
        let terms = QueryAnalyzer::new(&config).analyze("refund policy");

        // refund x2, policy x1, two distinct keywords, one two-word phrase
        let score = ranker.score("Refund policy. Another refund.", &terms);
        assert_eq!(score, 3 + 2 * KEYWORD_OVERLAP_BONUS + 3 * 2);

        let no_phrase = RetrievalConfig {
            phrase_bonus_enabled: false,
            ..RetrievalConfig::default()
        };
        let score = Ranker::new(&no_phrase).score("Refund policy. Another refund.", &terms);
        assert_eq!(score, 3 + 2 * KEYWORD_OVERLAP_BONUS);
    }

    #[test]
    fn test_top_k_limit() {
        let doc = (0..6)
            .map(|i| format!("Paragraph {} mentions invoices.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let ranking = rank(&doc, "invoices");

        assert_eq!(ranking.paragraphs.len(), TOP_K_PARAGRAPHS);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let doc = "Alpha talks about invoices.\n\n\
                   Nothing relevant here.\n\n\
                   Beta talks about invoices.\n\n\
                   Gamma talks about invoices.";
        let ranking = rank(doc, "invoices");
        let positions: Vec<usize> = ranking.paragraphs.iter().map(|p| p.position).collect();

        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[test]
    fn test_stopword_question_falls_back_to_prefix() {
        let doc = format!("{}\n\n{}", "a".repeat(4_000), "b".repeat(4_000));
        let ranking = rank(&doc, "what is the");

        assert_eq!(ranking.strategy, RankStrategy::PrefixFallback);
        assert_eq!(ranking.paragraphs.len(), 1);
        assert_eq!(ranking.paragraphs[0].text.chars().count(), 5_000);
        assert!(ranking.paragraphs[0].text.starts_with("aaaa"));
    }

    #[test]
    fn test_unmatched_keywords_fall_back_to_prefix() {
        let ranking = rank("Short document.\n\nAnother part.", "quantum entanglement");

        assert_eq!(ranking.strategy, RankStrategy::PrefixFallback);
        assert_eq!(texts(&ranking), vec!["Short document.\n\nAnother part."]);
    }

    #[test]
    fn test_summary_request_returns_long_prefix() {
        let doc = (0..200)
            .map(|i| format!("Section {} discusses topic number {} in some detail.", i, i))
            .collect::<Vec<_>>()
            .join("\n\n");
        assert!(doc.len() > 8_000);

        let ranking = rank(&doc, "Can you summarize this document?");
        assert_eq!(ranking.strategy, RankStrategy::Summary);
        assert_eq!(ranking.paragraphs[0].text.chars().count(), 8_000);
    }

    #[test]
    fn test_summary_checked_before_keywords() {
        // "summary" alone is a keyword-bearing question; the summary branch still wins
        let ranking = rank("Results are summarized below.\n\nOther text.", "summary");
        assert_eq!(ranking.strategy, RankStrategy::Summary);
    }

    #[test]
    fn test_empty_inputs_return_empty() {
        let config = RetrievalConfig::default();
        let ranker = Ranker::new(&config);

        assert!(ranker.rank(&[], "bots").is_empty());
        assert!(ranker.rank(&[], "").is_empty());
        assert!(ranker.rank(&[], "summarize").is_empty());

        let paragraphs = segment("Some text.");
        let ranking = ranker.rank(&paragraphs, "   ");
        assert!(ranking.is_empty());
        assert_eq!(ranking.strategy, RankStrategy::Empty);
    }

    #[test]
    fn test_question_with_regex_metacharacters() {
        let ranking = rank("C++ (advanced): templates.\n\nOther.", "c++ (advanced)");
        assert_ne!(ranking.strategy, RankStrategy::Empty);
    }
}
