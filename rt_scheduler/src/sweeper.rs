//! Periodic reservation sweeps.

use chrono::NaiveDateTime;
use restaurant_tables::{ReservationBook, SharedCoordinator, SweepOutcome};
use std::time::Instant;
use tokio::{
    sync::watch,
    time::{Duration, MissedTickBehavior, interval},
};

use crate::{logging, metrics};

/// Run one sweep cycle at `now` and record its outcome
pub async fn sweep_once<B: ReservationBook>(
    coordinator: &SharedCoordinator<B>,
    now: NaiveDateTime,
) -> SweepOutcome {
    let started = Instant::now();
    let outcome = coordinator.sweep(now).await;
    metrics::sweep_duration_ms(started.elapsed().as_secs_f64() * 1000.0);

    let SweepOutcome {
        expired,
        promoted,
        tables,
    } = &outcome;
    metrics::sweep_tables(promoted.count(), expired.count());
    metrics::sweep_unmatched("promote", promoted.unmatched);
    metrics::sweep_unmatched("expire", expired.unmatched);
    metrics::tables_by_status(tables);

    logging::log_sweep(
        &promoted.slot.to_string(),
        promoted.count(),
        expired.count(),
        promoted.unmatched + expired.unmatched,
    );

    outcome
}

/// Sweep every `period` until `shutdown` flips to true
///
/// # Arguments
///
/// * `coordinator` - Shared coordinator to sweep
/// * `period` - Time between cycles; the first cycle runs immediately
/// * `shutdown` - Stop signal
///
/// # Returns
///
/// * `usize` - Number of cycles run
pub async fn run<B: ReservationBook>(
    coordinator: SharedCoordinator<B>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cycles = 0;
    let (mut promoted, mut released) = (0, 0);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let cycle = sweep_once(&coordinator, chrono::Local::now().naive_local()).await;
                promoted += cycle.promoted.count();
                released += cycle.expired.count();
                cycles += 1;
            }

            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    log::info!(
        "Sweeper stopped after {} cycle(s): {} table(s) held, {} released",
        cycles,
        promoted,
        released
    );
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use restaurant_tables::{
        AllocationCoordinator, CustomerId, RegistryConfig, TableStatus, TimeSlot,
    };

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 11, 7)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn shared() -> SharedCoordinator {
        SharedCoordinator::new(
            AllocationCoordinator::from_config(&RegistryConfig::default()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_sweep_once_expires_then_promotes() {
        let coordinator = shared();
        coordinator
            .add_reservation(10, CustomerId::from("early"), TimeSlot::containing(at(18, 0)))
            .await
            .unwrap();
        coordinator
            .add_reservation(10, CustomerId::from("late"), TimeSlot::containing(at(19, 0)))
            .await
            .unwrap();

        let first = sweep_once(&coordinator, at(18, 10)).await;
        assert_eq!(first.promoted.tables, vec!["T008".to_string()]);

        // The 18:00 hold is released before the 19:00 booking claims the table.
        let second = sweep_once(&coordinator, at(19, 0)).await;
        assert_eq!(second.expired.tables, vec!["T008".to_string()]);
        assert_eq!(second.promoted.tables, vec!["T008".to_string()]);

        let big = second.tables.iter().find(|t| t.id() == "T008").unwrap();
        assert_eq!(big.status(), TableStatus::Reserved);
    }

    #[tokio::test]
    async fn test_sweep_once_promotes_late_booking_within_hour() {
        let coordinator = shared();
        coordinator
            .add_reservation(4, CustomerId::from("first"), TimeSlot::containing(at(12, 0)))
            .await
            .unwrap();
        let first = sweep_once(&coordinator, at(12, 0)).await;
        assert_eq!(first.promoted.tables, vec!["T003".to_string()]);

        coordinator
            .add_reservation(4, CustomerId::from("second"), TimeSlot::containing(at(12, 0)))
            .await
            .unwrap();
        let second = sweep_once(&coordinator, at(12, 15)).await;
        assert_eq!(second.promoted.tables, vec!["T004".to_string()]);

        let reserved = second
            .tables
            .iter()
            .filter(|t| t.status() == TableStatus::Reserved)
            .count();
        assert_eq!(reserved, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let coordinator = shared();
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(run(coordinator, Duration::from_secs(60), rx));
        tokio::time::sleep(Duration::from_secs(150)).await;
        tx.send(true).unwrap();

        let cycles = task.await.unwrap();
        assert_eq!(cycles, 3);
    }
}
