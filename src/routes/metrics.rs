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

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "dify_relay_requests_total",
        "Total number of proxied requests"
    );
    metrics::describe_histogram!(
        "dify_relay_request_duration_seconds",
        "Proxied request duration in seconds, including the Dify round trip"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a proxied request
pub fn record_request(status: &str, endpoint: &str, duration_secs: f64) {
    metrics::counter!(
        "dify_relay_requests_total",
        "status" => status.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "dify_relay_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}
