//! Configuration management for DocChat
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum keyword length, in characters
pub const MIN_KEYWORD_LENGTH: usize = 3;

/// Score added for every distinct keyword present in a paragraph
pub const KEYWORD_OVERLAP_BONUS: u32 = 2;

/// Score added per word of a phrase found verbatim in a paragraph
pub const PHRASE_WORD_BONUS: u32 = 3;

/// Paragraphs kept after keyword scoring
pub const TOP_K_PARAGRAPHS: usize = 3;

/// Length of the document prefix returned when nothing targeted matches
pub const PREFIX_FALLBACK_CHARS: usize = 5_000;

/// Length of the document prefix returned for summarization requests
pub const SUMMARY_FALLBACK_CHARS: usize = 8_000;

/// Leading paragraph characters searched for in page text
pub const PAGE_MATCH_PREFIX_CHARS: usize = 100;

/// Question words, auxiliaries, prepositions, determiners and request verbs
/// that carry no retrieval signal.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    // question words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    // auxiliary and modal verbs
    "does", "did", "do", "is", "are", "was", "were", "am", "be", "being", "been",
    "can", "could", "will", "would", "shall", "should", "may", "might", "must",
    // prepositions and conjunctions
    "about", "with", "for", "to", "from", "in", "on", "at", "by", "and", "or",
    // determiners
    "the", "a", "an", "this", "that", "these", "those",
    // request verbs
    "tell", "explain", "describe", "provide", "give", "me", "please",
    "information", "details", "regarding",
];

/// Substrings that turn a question into a summarization request
pub const DEFAULT_SUMMARY_TRIGGERS: &[&str] = &["summarize", "summary"];

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Retrieval engine configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Answer orchestration configuration
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Scoring and fallback parameters shared by the query analyzer, ranker
/// and page locator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Shortest token kept as a keyword
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,

    /// Bonus per distinct keyword present in a paragraph
    #[serde(default = "default_keyword_overlap_bonus")]
    pub keyword_overlap_bonus: u32,

    /// Bonus per word of a matched phrase
    #[serde(default = "default_phrase_word_bonus")]
    pub phrase_word_bonus: u32,

    /// Score multi-word phrases found verbatim
    #[serde(default = "default_phrase_bonus_enabled")]
    pub phrase_bonus_enabled: bool,

    /// Maximum paragraphs returned by keyword scoring
    #[serde(default = "default_top_k_paragraphs")]
    pub top_k_paragraphs: usize,

    /// Prefix length when no paragraph matches
    #[serde(default = "default_prefix_fallback_chars")]
    pub prefix_fallback_chars: usize,

    /// Prefix length for summarization requests
    #[serde(default = "default_summary_fallback_chars")]
    pub summary_fallback_chars: usize,

    /// Paragraph prefix length used to attribute pages
    #[serde(default = "default_page_match_prefix_chars")]
    pub page_match_prefix_chars: usize,

    /// Words ignored when extracting keywords and phrases
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Case-insensitive substrings marking a summarization request
    #[serde(default = "default_summary_triggers")]
    pub summary_triggers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerConfig {
    /// Upper bound on a single answer generator call, in seconds
    #[serde(default = "default_generator_timeout")]
    pub generator_timeout_secs: u64,

    /// Sentences quoted by the local answerer
    #[serde(default = "default_max_quoted_sentences")]
    pub max_quoted_sentences: usize,

    /// Sentences in a locally built overview
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name attached to log lines
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_min_keyword_length() -> usize { MIN_KEYWORD_LENGTH }
fn default_keyword_overlap_bonus() -> u32 { KEYWORD_OVERLAP_BONUS }
fn default_phrase_word_bonus() -> u32 { PHRASE_WORD_BONUS }
fn default_phrase_bonus_enabled() -> bool { true }
fn default_top_k_paragraphs() -> usize { TOP_K_PARAGRAPHS }
fn default_prefix_fallback_chars() -> usize { PREFIX_FALLBACK_CHARS }
fn default_summary_fallback_chars() -> usize { SUMMARY_FALLBACK_CHARS }
fn default_page_match_prefix_chars() -> usize { PAGE_MATCH_PREFIX_CHARS }
fn default_stopwords() -> Vec<String> { DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect() }
fn default_summary_triggers() -> Vec<String> { DEFAULT_SUMMARY_TRIGGERS.iter().map(|s| s.to_string()).collect() }
fn default_generator_timeout() -> u64 { 30 }
fn default_max_quoted_sentences() -> usize { 3 }
fn default_summary_sentences() -> usize { 6 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }
fn default_service_name() -> String { "docchat".to_string() }

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            min_keyword_length: default_min_keyword_length(),
            keyword_overlap_bonus: default_keyword_overlap_bonus(),
            phrase_word_bonus: default_phrase_word_bonus(),
            phrase_bonus_enabled: default_phrase_bonus_enabled(),
            top_k_paragraphs: default_top_k_paragraphs(),
            prefix_fallback_chars: default_prefix_fallback_chars(),
            summary_fallback_chars: default_summary_fallback_chars(),
            page_match_prefix_chars: default_page_match_prefix_chars(),
            stopwords: default_stopwords(),
            summary_triggers: default_summary_triggers(),
        }
    }
}

impl RetrievalConfig {
    /// Check whether a lowercased token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.iter().any(|s| s == token)
    }

    /// Check whether a question asks for a summary of the whole document
    pub fn is_summary_request(&self, question: &str) -> bool {
        let lower = question.to_lowercase();
        self.summary_triggers
            .iter()
            .any(|t| !t.is_empty() && lower.contains(&t.to_lowercase()))
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            generator_timeout_secs: default_generator_timeout(),
            max_quoted_sentences: default_max_quoted_sentences(),
            summary_sentences: default_summary_sentences(),
        }
    }
}

impl AnswerConfig {
    /// Get generator timeout as Duration
    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__RETRIEVAL__TOP_K_PARAGRAPHS=5
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }
}
