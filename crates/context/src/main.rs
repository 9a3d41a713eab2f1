//! DocChat command line
//!
//! Answers questions about one extracted document:
//! - `context` prints the retrieved context and its pages
//! - `ask` prints an answer together with the context it came from

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::{Cli, Command};
use docchat_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics, Answer, AnswerOrchestrator, ContextAssembler, ContextResult, Document, VERSION,
};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct AskOutput<'a> {
    question: &'a str,
    answer: Answer,
    context: ContextResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(&config.observability);
    metrics::register_metrics();

    info!(service = %config.observability.service_name, "Starting DocChat v{}", VERSION);

    match cli.command {
        Command::Context { document, question } => {
            let context = retrieve(&config, &document, &question)?;
            print_json(&context)?;
        }
        Command::Ask { document, question } => {
            let context = retrieve(&config, &document, &question)?;
            let answer = AnswerOrchestrator::from_config(&config)
                .answer(&question, &context)
                .await;

            print_json(&AskOutput {
                question: &question,
                answer,
                context,
            })?;
        }
    }

    Ok(())
}

fn retrieve(config: &AppConfig, path: &Path, question: &str) -> Result<ContextResult> {
    let document = Document::load(path)
        .with_context(|| format!("Failed to load document {}", path.display()))?;

    Ok(ContextAssembler::new(config.retrieval.clone()).assemble(
        question,
        &document.text,
        &document.pages,
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON
fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}
