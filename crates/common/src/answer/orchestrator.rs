//! Answer orchestrator - primary generator with local fallback

use super::{Answer, AnswerGenerator, AnswerSource, LocalAnswerer};
use crate::config::AppConfig;
use crate::context::ContextResult;
use crate::errors::{AppError, Result};
use crate::metrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Routes a question to the primary generator, substituting the local
/// answer when it fails
pub struct AnswerOrchestrator {
    primary: Option<Arc<dyn AnswerGenerator>>,
    fallback: LocalAnswerer,
    timeout: Duration,
}

impl AnswerOrchestrator {
    /// Create an orchestrator with only the local answerer
    pub fn new(fallback: LocalAnswerer, timeout: Duration) -> Self {
        Self {
            primary: None,
            fallback,
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            LocalAnswerer::new(config.answer.clone(), config.retrieval.clone()),
            config.answer.generator_timeout(),
        )
    }

    /// Attach a primary generator
    pub fn with_primary(mut self, primary: Arc<dyn AnswerGenerator>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Answer a question from its context. Never fails.
    pub async fn answer(&self, question: &str, context: &ContextResult) -> Answer {
        let start = Instant::now();

        let answer = match &self.primary {
            Some(primary) => match self.call_primary(primary.as_ref(), question, context).await {
                Ok(text) => Answer {
                    text,
                    pages: context.pages.clone(),
                    source: AnswerSource::Primary {
                        generator: primary.name().to_string(),
                    },
                },
                Err(e) => {
                    warn!(
                        generator = primary.name(),
                        error = %e,
                        upstream = e.is_upstream(),
                        "Answer generator failed, using local answer"
                    );
                    metrics::record_generator_failure(primary.name(), &e.code().as_code().to_string());
                    self.local(question, context)
                }
            },
            None => self.local(question, context),
        };

        debug!(source = answer.source.as_str(), chars = answer.text.len(), "Answer ready");
        metrics::record_answer(start.elapsed().as_secs_f64(), answer.source.as_str());

        answer
    }

    async fn call_primary(
        &self,
        primary: &dyn AnswerGenerator,
        question: &str,
        context: &ContextResult,
    ) -> Result<String> {
        let reply = tokio::time::timeout(self.timeout, primary.generate(question, context))
            .await
            .map_err(|_| AppError::UpstreamTimeout {
                service: primary.name().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        if reply.trim().is_empty() {
            return Err(AppError::MalformedResponse {
                service: primary.name().to_string(),
                message: "empty answer".to_string(),
            });
        }

        Ok(reply)
    }

    fn local(&self, question: &str, context: &ContextResult) -> Answer {
        Answer {
            text: self.fallback.answer(question, context),
            pages: context.pages.clone(),
            source: AnswerSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SelectionStrategy;

    struct Echo;

    #[async_trait::async_trait]
    impl AnswerGenerator for Echo {
        async fn generate(&self, question: &str, context: &ContextResult) -> Result<String> {
            Ok(format!("{} -> {}", question, context.context))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl AnswerGenerator for Failing {
        async fn generate(&self, _question: &str, _context: &ContextResult) -> Result<String> {
            Err(AppError::Upstream {
                service: "failing".into(),
                message: "connection refused".into(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Slow;

    #[async_trait::async_trait]
    impl AnswerGenerator for Slow {
        async fn generate(&self, _question: &str, _context: &ContextResult) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".into())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct Blank;

    #[async_trait::async_trait]
    impl AnswerGenerator for Blank {
        async fn generate(&self, _question: &str, _context: &ContextResult) -> Result<String> {
            Ok("  \n".into())
        }

        fn name(&self) -> &str {
            "blank"
        }
    }

    fn context() -> ContextResult {
        ContextResult {
            context: "Invoices are sent monthly.".into(),
            pages: vec![4],
            strategy: SelectionStrategy::KeywordScore,
        }
    }

    fn orchestrator(primary: Option<Arc<dyn AnswerGenerator>>) -> AnswerOrchestrator {
        let base = AnswerOrchestrator::new(LocalAnswerer::default(), Duration::from_millis(50));
        match primary {
            Some(p) => base.with_primary(p),
            None => base,
        }
    }

    #[tokio::test]
    async fn test_primary_success() {
        let answer = orchestrator(Some(Arc::new(Echo)))
            .answer("invoices", &context())
            .await;

        assert_eq!(answer.text, "invoices -> Invoices are sent monthly.");
        assert_eq!(answer.pages, vec![4]);
        assert_eq!(answer.source, AnswerSource::Primary { generator: "echo".into() });
    }

    #[tokio::test]
    async fn test_no_primary_uses_local() {
        let answer = orchestrator(None).answer("invoices", &context()).await;

        assert_eq!(answer.source, AnswerSource::Fallback);
        assert!(answer.text.contains("Invoices are sent monthly."));
        assert!(answer.text.ends_with("(Source: page 4)"));
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let answer = orchestrator(Some(Arc::new(Failing)))
            .answer("invoices", &context())
            .await;

        assert_eq!(answer.source, AnswerSource::Fallback);
        assert_eq!(answer.pages, vec![4]);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let start = Instant::now();
        let answer = orchestrator(Some(Arc::new(Slow)))
            .answer("invoices", &context())
            .await;

        assert_eq!(answer.source, AnswerSource::Fallback);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back() {
        let answer = orchestrator(Some(Arc::new(Blank)))
            .answer("invoices", &context())
            .await;

        assert_eq!(answer.source, AnswerSource::Fallback);
    }

    #[tokio::test]
    async fn test_local_answerer_as_primary() {
        let answer = orchestrator(Some(Arc::new(LocalAnswerer::default())))
            .answer("bots", &ContextResult::empty_document())
            .await;

        assert_eq!(answer.source, AnswerSource::Primary { generator: "local".into() });
        assert!(answer.pages.is_empty());
    }
}
