//! Metrics and observability utilities
//!
//! Metrics go through the `metrics` facade; whichever recorder the host
//! process installs receives them. Without a recorder they are no-ops.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all DocChat metrics
pub const METRICS_PREFIX: &str = "docchat";

/// Register all metric descriptions
pub fn register_metrics() {
    // Retrieval metrics
    describe_counter!(
        format!("{}_retrievals_total", METRICS_PREFIX),
        Unit::Count,
        "Total context retrievals, by selection strategy"
    );

    describe_histogram!(
        format!("{}_retrieval_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Context retrieval latency in seconds"
    );

    describe_histogram!(
        format!("{}_retrieval_pages", METRICS_PREFIX),
        Unit::Count,
        "Pages attributed to a retrieved context"
    );

    // Answer metrics
    describe_counter!(
        format!("{}_answers_total", METRICS_PREFIX),
        Unit::Count,
        "Total answers produced, by source"
    );

    describe_histogram!(
        format!("{}_answer_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Answer latency in seconds, including fallback"
    );

    describe_counter!(
        format!("{}_generator_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Answer generator failures absorbed by the local fallback"
    );

    tracing::debug!("Metrics registered");
}

/// Helper to record retrieval metrics
pub fn record_retrieval(duration_secs: f64, strategy: &str, page_count: usize) {
    counter!(
        format!("{}_retrievals_total", METRICS_PREFIX),
        "strategy" => strategy.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_retrieval_duration_seconds", METRICS_PREFIX),
        "strategy" => strategy.to_string()
    )
    .record(duration_secs);

    histogram!(format!("{}_retrieval_pages", METRICS_PREFIX)).record(page_count as f64);
}

/// Helper to record answer metrics
pub fn record_answer(duration_secs: f64, source: &str) {
    counter!(
        format!("{}_answers_total", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_answer_duration_seconds", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .record(duration_secs);
}

/// Helper to record a generator failure
pub fn record_generator_failure(generator: &str, reason: &str) {
    counter!(
        format!("{}_generator_failures_total", METRICS_PREFIX),
        "generator" => generator.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}
