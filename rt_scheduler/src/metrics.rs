//! Prometheus metrics for monitoring table occupancy and sweeps.
//!
//! Metrics are exposed in Prometheus text format when an exporter address is
//! configured; otherwise the recorder calls are no-ops.
//!
//! # Metrics
//!
//! - `tables_by_status{status}`: tables currently vacant, reserved, occupied
//! - `sweep_tables_promoted_total`, `sweep_tables_released_total`
//! - `sweep_unmatched_total{sweep}`: bookings that found no table
//! - `sweep_duration_ms`: time spent holding the coordinator lock per cycle

use metrics_exporter_prometheus::PrometheusBuilder;
use restaurant_tables::{Table, TableStatus};
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record table counts per status.
pub fn tables_by_status(tables: &[Table]) {
    for status in [
        TableStatus::Vacant,
        TableStatus::Reserved,
        TableStatus::Occupied,
    ] {
        let count = tables.iter().filter(|t| t.status() == status).count();
        metrics::gauge!("tables_by_status", "status" => status.to_string()).set(count as f64);
    }
}

/// Record tables moved by a sweep cycle.
pub fn sweep_tables(promoted: usize, released: usize) {
    metrics::counter!("sweep_tables_promoted_total").increment(promoted as u64);
    metrics::counter!("sweep_tables_released_total").increment(released as u64);
}

/// Record bookings that found no table.
pub fn sweep_unmatched(sweep: &'static str, unmatched: usize) {
    metrics::counter!("sweep_unmatched_total", "sweep" => sweep).increment(unmatched as u64);
}

/// Record sweep duration in milliseconds.
pub fn sweep_duration_ms(duration_ms: f64) {
    metrics::histogram!("sweep_duration_ms").record(duration_ms);
}
