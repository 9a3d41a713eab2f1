//! Local answerer - deterministic answers built from the context itself

use super::AnswerGenerator;
use crate::config::{AnswerConfig, RetrievalConfig};
use crate::context::{ContextResult, QueryAnalyzer, SelectionStrategy};
use crate::errors::Result;

const EMPTY_DOCUMENT_ANSWER: &str = "I couldn't find any readable text in this document. \
    It may be a scanned image or an empty file. Try uploading a text-based PDF.";

/// Answers by quoting or summarizing the retrieved context
#[derive(Debug, Clone, Default)]
pub struct LocalAnswerer {
    answer: AnswerConfig,
    retrieval: RetrievalConfig,
}

impl LocalAnswerer {
    pub fn new(answer: AnswerConfig, retrieval: RetrievalConfig) -> Self {
        Self { answer, retrieval }
    }

    /// Build an answer; never fails
    pub fn answer(&self, question: &str, context: &ContextResult) -> String {
        match context.strategy {
            SelectionStrategy::EmptyDocument => return EMPTY_DOCUMENT_ANSWER.to_string(),
            SelectionStrategy::NoMatch => {
                return format!(
                    "I couldn't find anything about \"{}\" in this document. \
                     Try rephrasing your question or asking about a different topic.",
                    question.trim()
                )
            }
            _ => {}
        }

        let sentences = split_sentences(&context.context);

        let body = if self.retrieval.is_summary_request(question) {
            let overview = sentences
                .iter()
                .take(self.answer.summary_sentences)
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            format!("Here's an overview of the document:\n\n{}", overview)
        } else {
            format!("Based on the document:\n\n{}", self.quote(question, &sentences))
        };

        match citation(&context.pages) {
            Some(line) => format!("{}\n\n{}", body, line),
            None => body,
        }
    }

    /// Sentences mentioning a keyword, in context order; the opening
    /// sentences when none do
    fn quote(&self, question: &str, sentences: &[&str]) -> String {
        let terms = QueryAnalyzer::new(&self.retrieval).analyze(question);
        let limit = self.answer.max_quoted_sentences;

        let mut picked: Vec<&str> = sentences
            .iter()
            .filter(|s| {
                let lower = s.to_lowercase();
                terms.keywords.iter().any(|k| lower.contains(k.as_str()))
            })
            .take(limit)
            .copied()
            .collect();

        if picked.is_empty() {
            picked = sentences.iter().take(limit).copied().collect();
        }

        picked.join(" ")
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for LocalAnswerer {
    async fn generate(&self, question: &str, context: &ContextResult) -> Result<String> {
        Ok(self.answer(question, context))
    }

    fn name(&self) -> &str {
        "local"
    }
}

fn citation(pages: &[u32]) -> Option<String> {
    match pages {
        [] => None,
        [page] => Some(format!("(Source: page {})", page)),
        _ => {
            let list = pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!("(Source: pages {})", list))
        }
    }
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace,
/// and at blank lines
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let boundary = match ch {
            '.' | '!' | '?' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            '\n' => matches!(chars.peek(), Some((_, '\n'))),
            _ => false,
        };

        if boundary {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
