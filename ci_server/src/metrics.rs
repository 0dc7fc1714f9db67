//! Prometheus metrics for the status endpoints.

use metrics::{counter, histogram};

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a computed badge by its color.
pub fn badge_rendered(color: &str) {
    counter!("ci_badge_requests_total", "color" => color.to_string()).increment(1);
}

/// Record a default badge served because of `reason`.
pub fn badge_degraded(reason: &'static str) {
    counter!("ci_badge_degraded_total", "reason" => reason).increment(1);
}

/// Record the size of a workflow traversal.
pub fn reachable_jobs(count: usize) {
    histogram!("ci_workflow_reachable_jobs").record(count as f64);
}

/// Record a step-metrics request outcome (`ok`, `not_found`, `bad_request`, `error`).
pub fn step_metrics_request(outcome: &'static str) {
    counter!("ci_step_metrics_requests_total", "outcome" => outcome).increment(1);
}
