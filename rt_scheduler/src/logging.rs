//! Structured logging configuration.
//!
//! Records emitted through the `log` facade by the allocation library are
//! captured by the same subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var (default: `info`).
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log the outcome of one sweep cycle with structured fields
pub fn log_sweep(slot: &str, promoted: usize, released: usize, unmatched: usize) {
    if unmatched > 0 {
        tracing::warn!(
            slot = slot,
            promoted = promoted,
            released = released,
            unmatched = unmatched,
            "SWEEP: bookings without a matching table"
        );
    } else {
        tracing::info!(
            slot = slot,
            promoted = promoted,
            released = released,
            "SWEEP: completed"
        );
    }
}
