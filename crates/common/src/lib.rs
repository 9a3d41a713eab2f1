//! DocChat Common Library
//!
//! Shared code for the DocChat document question-answering tools:
//! - Relevance retrieval engine (segmentation, query analysis, ranking,
//!   page attribution, context assembly)
//! - Answer orchestration with a local deterministic fallback
//! - Extracted document loading
//! - Error types and handling
//! - Configuration management
//! - Metrics

pub mod answer;
pub mod config;
pub mod context;
pub mod document;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::{AppConfig, RetrievalConfig};
pub use context::{ContextAssembler, ContextResult, PageRecord};
pub use answer::{Answer, AnswerGenerator, AnswerOrchestrator, LocalAnswerer};
pub use document::Document;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
