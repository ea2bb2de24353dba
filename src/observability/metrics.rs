//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pdf_requests_total` (counter): requests by endpoint and status
//! - `pdf_request_duration_seconds` (histogram): latency by endpoint
//! - `pdf_compress_bytes_in_total` / `pdf_compress_bytes_out_total`
//!   (counters): upload and output volume
//! - `pdf_compress_duration_seconds` (histogram): end-to-end compression time
//!
//! # Design Decisions
//! - Exposition via the Prometheus exporter on its own listener
//! - A failed exporter install is logged, never fatal: the service keeps
//!   serving without metrics

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(%error, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "pdf_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("pdf_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record one completed compression.
pub fn record_compression(bytes_in: u64, bytes_out: u64, start: Instant) {
    metrics::counter!("pdf_compress_bytes_in_total").increment(bytes_in);
    metrics::counter!("pdf_compress_bytes_out_total").increment(bytes_out);
    metrics::histogram!("pdf_compress_duration_seconds").record(start.elapsed().as_secs_f64());
}
