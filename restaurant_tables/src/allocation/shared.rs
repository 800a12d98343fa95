//! Coordinator handle shared between async tasks.

use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::coordinator::{AllocationCoordinator, SweepReport};
use crate::{
    reservation::{BookingResult, CustomerId, InMemoryReservationBook, ReservationBook, TimeSlot},
    table::{Table, TableId, TableResult},
};

/// Result of one expiry-then-promotion cycle, taken under a single lock
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub expired: SweepReport,
    pub promoted: SweepReport,

    /// Every table as the cycle left it, in identifier order
    pub tables: Vec<Table>,
}

/// Cloneable handle to one coordinator.
///
/// Every call holds the lock for the whole operation, so the scan-and-set
/// inside a seating or sweep runs as a single critical section and two
/// callers can never be given the same table.
pub struct SharedCoordinator<B = InMemoryReservationBook> {
    inner: Arc<Mutex<AllocationCoordinator<B>>>,
}

impl<B> Clone for SharedCoordinator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: ReservationBook> SharedCoordinator<B> {
    pub fn new(coordinator: AllocationCoordinator<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    /// Lock the coordinator for a sequence of operations
    pub async fn lock(&self) -> MutexGuard<'_, AllocationCoordinator<B>> {
        self.inner.lock().await
    }

    pub async fn add_table(&self, id: impl Into<TableId>, pax: u32) -> TableResult<TableId> {
        self.inner.lock().await.add_table(id, pax)
    }

    pub async fn remove_table(&self, id: &str) -> TableResult<Table> {
        self.inner.lock().await.remove_table(id)
    }

    pub async fn update_table(&self, id: &str, pax: u32) -> TableResult<()> {
        self.inner.lock().await.update_table(id, pax)
    }

    pub async fn check_availability(&self, pax: u32) -> bool {
        self.inner.lock().await.check_availability(pax)
    }

    pub async fn seat_walk_in(&self, pax: u32) -> TableResult<TableId> {
        self.inner.lock().await.seat_walk_in(pax)
    }

    pub async fn seat_booked(&self, pax: u32) -> TableResult<TableId> {
        self.inner.lock().await.seat_booked(pax)
    }

    pub async fn unseat(&self, id: &str) -> TableResult<()> {
        self.inner.lock().await.unseat(id)
    }

    pub async fn add_reservation(
        &self,
        pax: u32,
        customer: CustomerId,
        slot: TimeSlot,
    ) -> BookingResult {
        self.inner.lock().await.add_reservation(pax, customer, slot)
    }

    pub async fn remove_reservation(&self, customer: &CustomerId, slot: TimeSlot) -> bool {
        self.inner.lock().await.remove_reservation(customer, slot)
    }

    pub async fn check_reservation(&self, customer: &CustomerId, slot: TimeSlot) -> bool {
        self.inner.lock().await.check_reservation(customer, slot)
    }

    /// Move a booking; removal, re-booking and any restore happen under one lock
    pub async fn update_reservation(
        &self,
        customer: &CustomerId,
        old_slot: TimeSlot,
        pax: u32,
        new_slot: TimeSlot,
        new_pax: u32,
    ) -> BookingResult {
        self.inner
            .lock()
            .await
            .update_reservation(customer, old_slot, pax, new_slot, new_pax)
    }

    /// Run an expiry sweep followed by a promotion sweep under one lock
    ///
    /// # Arguments
    ///
    /// * `now` - Instant the sweeps run at
    ///
    /// # Returns
    ///
    /// * `SweepOutcome` - Both reports and the tables as the sweeps left them
    pub async fn sweep(&self, now: NaiveDateTime) -> SweepOutcome {
        let mut coordinator = self.inner.lock().await;
        let expired = coordinator.sweep_expire(now);
        let promoted = coordinator.sweep_promote(now);
        SweepOutcome {
            expired,
            promoted,
            tables: coordinator.registry().tables().cloned().collect(),
        }
    }

    /// Snapshot of every table in identifier order
    pub async fn tables(&self) -> Vec<Table> {
        self.inner.lock().await.registry().tables().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{RegistryConfig, TableStatus};

    fn shared() -> SharedCoordinator {
        SharedCoordinator::new(AllocationCoordinator::from_config(&RegistryConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_concurrent_walk_ins_never_share_a_table() {
        let coordinator = shared();

        let mut handles = Vec::new();
        for _ in 0..5 {
            let coordinator = coordinator.clone();
            handles.push(tokio::spawn(async move { coordinator.seat_walk_in(4).await }));
        }

        let mut seated = Vec::new();
        let mut refused = 0;
        for handle in handles {
            match handle.await.expect("task should not panic") {
                Ok(id) => seated.push(id),
                Err(_) => refused += 1,
            }
        }

        seated.sort();
        assert_eq!(seated, vec!["T003", "T004", "T005"]);
        assert_eq!(refused, 2);
    }

    #[tokio::test]
    async fn test_lock_allows_multi_step_operations() {
        let coordinator = shared();
        {
            let mut guard = coordinator.lock().await;
            guard.seat_walk_in(2).unwrap();
            guard.seat_walk_in(2).unwrap();
        }

        assert!(!coordinator.check_availability(2).await);
        let tables = coordinator.tables().await;
        assert_eq!(tables[0].status(), TableStatus::Occupied);
        assert_eq!(tables[1].status(), TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_sweep_snapshot_matches_reports() {
        let coordinator = shared();
        let slot = TimeSlot::containing(
            chrono::NaiveDate::from_ymd_opt(2021, 11, 7)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
        );
        coordinator
            .add_reservation(6, CustomerId::from("alice"), slot)
            .await
            .unwrap();

        let outcome = coordinator.sweep(slot.start()).await;
        assert_eq!(outcome.promoted.tables, vec!["T006".to_string()]);
        assert_eq!(outcome.expired.count(), 0);

        let t006 = outcome.tables.iter().find(|t| t.id() == "T006").unwrap();
        assert_eq!(t006.status(), TableStatus::Reserved);
        assert_eq!(outcome.tables.len(), 8);
    }

    #[tokio::test]
    async fn test_shared_reservation_and_table_updates() {
        let coordinator = shared();
        let alice = CustomerId::from("alice");
        let slot = TimeSlot::containing(
            chrono::NaiveDate::from_ymd_opt(2021, 11, 7)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        );

        coordinator.add_reservation(2, alice.clone(), slot).await.unwrap();
        assert_eq!(
            coordinator
                .update_reservation(&alice, slot, 2, slot.next(), 4)
                .await,
            Ok(0)
        );
        assert!(!coordinator.check_reservation(&alice, slot).await);
        assert!(coordinator.check_reservation(&alice, slot.next()).await);

        coordinator.update_table("T001", 7).await.unwrap();
        let tables = coordinator.tables().await;
        assert_eq!(tables[0].capacity(), 8);
    }
}
