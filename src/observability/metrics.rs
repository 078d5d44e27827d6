//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by action and status
//! - `edge_request_duration_seconds` (histogram): latency by action

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored; the service runs
/// without metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed edge request.
pub fn record_request(action: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "edge_requests_total",
        "action" => action,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("edge_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
