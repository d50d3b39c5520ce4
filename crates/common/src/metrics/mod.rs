//! Metrics and observability utilities
//!
//! Metric names share the `portfolio` prefix. Without an installed
//! recorder every helper is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all portfolio metrics
pub const METRICS_PREFIX: &str = "portfolio";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Content metrics
    describe_counter!(
        format!("{}_documents_fetched_total", METRICS_PREFIX),
        Unit::Count,
        "Documents read from the store"
    );

    // Contact metrics
    describe_counter!(
        format!("{}_messages_received_total", METRICS_PREFIX),
        Unit::Count,
        "Contact messages stored"
    );

    describe_counter!(
        format!("{}_validation_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Payloads rejected by schema validation"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

pub fn record_documents_fetched(collection: &str, count: usize) {
    counter!(
        format!("{}_documents_fetched_total", METRICS_PREFIX),
        "collection" => collection.to_string()
    )
    .increment(count as u64);
}

pub fn record_message_received() {
    counter!(format!("{}_messages_received_total", METRICS_PREFIX)).increment(1);
}

pub fn record_validation_failure(collection: &str) {
    counter!(
        format!("{}_validation_failures_total", METRICS_PREFIX),
        "collection" => collection.to_string()
    )
    .increment(1);
}
