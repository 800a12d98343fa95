//! Reservation sweeper for a restaurant floor.
//!
//! Builds the table registry from the configured floor plan and, on a fixed
//! interval, releases tables held for past bookings and holds tables for
//! bookings due this hour.

mod bookings;
mod config;
mod logging;
mod metrics;
mod sweeper;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use restaurant_tables::{AllocationCoordinator, InMemoryReservationBook, SharedCoordinator};
use tokio::{sync::watch, time::Duration};

use config::SchedulerConfig;

const HELP: &str = "\
Run the periodic reservation sweeper

USAGE:
  rt_scheduler [OPTIONS]

OPTIONS:
  --tables     LIST        Floor plan as ID:PAX,...    [default: env SEATING_TABLES or T001:2,...,T008:10]
  --bookings   LIST        Bookings as CUSTOMER:PAX:YYYY-MM-DDTHH,...  [default: env RESERVATIONS]
  --interval   SECS        Seconds between sweeps      [default: env SWEEP_INTERVAL_SECS or 60]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SEATING_TABLES           Floor plan (e.g., A1:2,A2:4,B1:6)
  RESERVATIONS             Bookings (e.g., alice:4:2021-11-07T19,bob:2:2021-11-07T20)
  SWEEP_INTERVAL_SECS      Seconds between sweeps
  METRICS_BIND             Prometheus exporter address (e.g., 127.0.0.1:9090)
  RUST_LOG                 Log filter (default: info)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let tables_override: Option<String> = pargs.opt_value_from_str("--tables")?;
    let bookings_override: Option<String> = pargs.opt_value_from_str("--bookings")?;
    let interval_override: Option<u64> = pargs.opt_value_from_str("--interval")?;

    logging::init();

    let config = SchedulerConfig::from_env(tables_override, bookings_override, interval_override)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Metrics exporter listening on {}", addr);
    }

    let mut coordinator: AllocationCoordinator<InMemoryReservationBook> =
        AllocationCoordinator::from_config(&config.tables)?;
    let placed = bookings::place(&mut coordinator, &config.reservations);
    info!(
        "Floor ready with {} table(s) and {} booking(s), sweeping every {}s",
        coordinator.registry().len(),
        placed,
        config.sweep_interval_secs
    );

    // Catching signals for a clean stop.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    set_handler(move || {
        let _ = shutdown_tx.send(true);
    })?;

    let cycles = sweeper::run(
        SharedCoordinator::new(coordinator),
        Duration::from_secs(config.sweep_interval_secs),
        shutdown_rx,
    )
    .await;

    info!("Shut down after {} sweep cycle(s)", cycles);

    Ok(())
}
