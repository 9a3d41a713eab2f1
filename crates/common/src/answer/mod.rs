//! Answer orchestration
//!
//! Turns an assembled context into a user-facing answer:
//! - `AnswerGenerator` is the seam for any answer backend
//! - `LocalAnswerer` is the deterministic built-in backend
//! - `AnswerOrchestrator` tries a primary backend and falls back to the
//!   local one on failure, timeout or an empty reply

mod local;
mod orchestrator;

pub use local::{split_sentences, LocalAnswerer};
pub use orchestrator::AnswerOrchestrator;

use crate::context::ContextResult;
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Produces an answer from a question and its retrieved context
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer, or fail with an upstream-class error
    async fn generate(&self, question: &str, context: &ContextResult) -> Result<String>;

    /// Short name used in logs and metrics
    fn name(&self) -> &str;
}

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerSource {
    /// The configured primary generator
    Primary { generator: String },
    /// The local deterministic answerer
    Fallback,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Primary { .. } => "primary",
            AnswerSource::Fallback => "fallback",
        }
    }
}

/// Final answer for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text
    pub text: String,

    /// Pages the answer is grounded on
    pub pages: Vec<u32>,

    /// Generator that produced `text`
    pub source: AnswerSource,
}
