//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "chatbridge_requests_total",
        "Total number of chat completion requests processed"
    );
    metrics::describe_histogram!(
        "chatbridge_request_duration_seconds",
        "Chat completion duration in seconds, until the last byte for streams"
    );
    metrics::describe_counter!(
        "chatbridge_upstream_errors_total",
        "Upstream failures by kind"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a finished request
pub fn record_request(status: &str, model: &str, duration_secs: f64) {
    metrics::counter!("chatbridge_requests_total", "status" => status.to_string(), "model" => model.to_string())
        .increment(1);
    metrics::histogram!("chatbridge_request_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// Record an upstream failure
pub fn record_upstream_error(kind: &str) {
    metrics::counter!("chatbridge_upstream_errors_total", "kind" => kind.to_string()).increment(1);
}
