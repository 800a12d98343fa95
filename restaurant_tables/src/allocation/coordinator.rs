//! Allocation coordinator keeping the table registry and reservation book in step.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    reservation::{
        BookingRejection, BookingResult, CustomerId, InMemoryReservationBook, ReservationBook,
        TimeSlot,
    },
    table::{
        RegistryConfig, Table, TableId, TableRegistry, TableResult, TableStatus, seating_capacity,
    },
};

/// Outcome of a promotion or expiry sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Slot the sweep ran against
    pub slot: TimeSlot,

    /// Tables whose status changed, in the order they were changed
    pub tables: Vec<TableId>,

    /// Reservations for which no table of the right size was in the
    /// required state
    pub unmatched: usize,
}

impl SweepReport {
    fn empty(slot: TimeSlot) -> Self {
        Self {
            slot,
            tables: Vec::new(),
            unmatched: 0,
        }
    }

    /// Number of tables moved
    pub fn count(&self) -> usize {
        self.tables.len()
    }
}

/// Orchestrates a table registry and a reservation book.
///
/// The registry never talks to the book; every operation that needs both
/// goes through here.
pub struct AllocationCoordinator<B = InMemoryReservationBook> {
    registry: TableRegistry,
    book: B,

    /// Customers per slot whose booking already holds a table, so repeated
    /// sweeps within an hour hold no extra tables
    held: BTreeMap<TimeSlot, BTreeSet<CustomerId>>,
}

impl<B: ReservationBook> AllocationCoordinator<B> {
    /// Create a coordinator and push the registry's capacity buckets to the book
    ///
    /// # Arguments
    ///
    /// * `registry` - Tables on the floor
    /// * `book` - Reservation book
    ///
    /// # Returns
    ///
    /// * `AllocationCoordinator` - Coordinator owning both
    pub fn new(registry: TableRegistry, mut book: B) -> Self {
        book.set_capacity_buckets(registry.bucket_counts());
        Self {
            registry,
            book,
            held: BTreeMap::new(),
        }
    }

    /// Create a coordinator over a fresh book from a floor plan
    pub fn from_config(config: &RegistryConfig) -> TableResult<Self>
    where
        B: Default,
    {
        Ok(Self::new(TableRegistry::from_config(config)?, B::default()))
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn book(&self) -> &B {
        &self.book
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    /// Add a table and grow the book's bucket for its capacity.
    ///
    /// A rejected add leaves the book untouched.
    pub fn add_table(&mut self, id: impl Into<TableId>, pax: u32) -> TableResult<TableId> {
        let id = self.registry.add_table(id, pax)?;
        if let Some(capacity) = seating_capacity(pax) {
            self.book.grow_bucket(capacity);
        }
        Ok(id)
    }

    /// Remove a vacant table.
    ///
    /// The book's capacity buckets are not shrunk.
    pub fn remove_table(&mut self, id: &str) -> TableResult<Table> {
        self.registry.remove_table(id)
    }

    /// Resize a vacant table.
    ///
    /// The book's capacity buckets keep counting the old size.
    // TODO: resync book buckets here once it is settled whether resizing a
    // table should change how many bookings each slot accepts.
    pub fn update_table(&mut self, id: &str, pax: u32) -> TableResult<()> {
        let result = self.registry.update_table(id, pax);
        if let Err(e) = &result
            && e.is_fatal()
        {
            log::error!("Registry lost table {} while resizing: {}", id, e);
        }
        result
    }

    // ------------------------------------------------------------------
    // Seating
    // ------------------------------------------------------------------

    pub fn check_availability(&self, pax: u32) -> bool {
        self.registry.check_availability(pax)
    }

    /// Seat a walk-in party at the lowest-numbered vacant table of its size
    pub fn seat_walk_in(&mut self, pax: u32) -> TableResult<TableId> {
        let result = self.registry.seat_walk_in(pax);
        match &result {
            Ok(id) => log::info!("Seated walk-in party of {} at {}", pax, id),
            Err(e) => log::warn!("Walk-in refused: {}", e),
        }
        result
    }

    /// Seat a party arriving for its booking at a held table
    pub fn seat_booked(&mut self, pax: u32) -> TableResult<TableId> {
        let result = self.registry.seat_booked(pax);
        match &result {
            Ok(id) => log::info!("Seated booked party of {} at {}", pax, id),
            Err(e) => log::warn!("Booked seating refused: {}", e),
        }
        result
    }

    /// Free a table once its party leaves
    pub fn unseat(&mut self, id: &str) -> TableResult<()> {
        self.registry.unseat(id)?;
        log::info!("Table {} is vacant", id);
        Ok(())
    }

    /// Hold a vacant table by hand
    pub fn reserve(&mut self, pax: u32) -> TableResult<TableId> {
        self.registry.reserve(pax)
    }

    /// Give up a held table by hand
    pub fn release(&mut self, pax: u32) -> TableResult<TableId> {
        self.registry.release(pax)
    }

    pub fn available_tables(&self) -> Vec<&Table> {
        self.registry.available_tables()
    }

    /// Force every table to vacant
    pub fn reset_all(&mut self) {
        self.registry.reset_all();
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    /// Book a table for `customer` in `slot`
    ///
    /// # Arguments
    ///
    /// * `pax` - Party size
    /// * `customer` - Customer making the booking
    /// * `slot` - Hour the party arrives
    ///
    /// # Returns
    ///
    /// * `BookingResult` - Index of the booking within its slot, or the
    ///   book's reason for refusing it
    pub fn add_reservation(
        &mut self,
        pax: u32,
        customer: CustomerId,
        slot: TimeSlot,
    ) -> BookingResult {
        let result = self.book.add_reservation(customer.clone(), pax, slot);
        match &result {
            Ok(index) => log::info!(
                "Booked {} for {} at {} (#{})",
                customer,
                pax,
                slot,
                index
            ),
            Err(e) => log::info!("Booking for {} at {} refused: {}", customer, slot, e),
        }
        result
    }

    /// Cancel a booking and release the table it held
    ///
    /// # Returns
    ///
    /// * `bool` - Whether a booking existed
    pub fn remove_reservation(&mut self, customer: &CustomerId, slot: TimeSlot) -> bool {
        let Some(pax) = self.book.remove_reservation(customer, slot) else {
            return false;
        };
        self.forget_hold(customer, slot);

        match self
            .registry
            .transition(pax, TableStatus::Reserved, TableStatus::Vacant)
        {
            Some(id) => log::info!("Cancelled {} at {}, released {}", customer, slot, id),
            None => log::info!("Cancelled {} at {}", customer, slot),
        }

        true
    }

    pub fn check_reservation(&self, customer: &CustomerId, slot: TimeSlot) -> bool {
        self.book.check_reservation(customer, slot)
    }

    /// Move a booking to a new slot or party size
    ///
    /// The old booking is removed first. If the new one is refused, the old
    /// booking is put back at `old_slot` with the party size the book held
    /// for it. Tables are never touched, so a table already held for the old
    /// booking stays reserved. After a successful move that table is no
    /// longer backed by any booking, and expiry will not free it; use
    /// `release` or `unseat` to give it back.
    ///
    /// # Arguments
    ///
    /// * `customer` - Customer holding the booking
    /// * `old_slot` - Current slot
    /// * `pax` - Current party size, as the caller knows it
    /// * `new_slot` - Requested slot
    /// * `new_pax` - Requested party size
    ///
    /// # Returns
    ///
    /// * `BookingResult` - Index of the new booking, `NotFound` if there was
    ///   nothing to move, or the reason the new booking was refused
    pub fn update_reservation(
        &mut self,
        customer: &CustomerId,
        old_slot: TimeSlot,
        pax: u32,
        new_slot: TimeSlot,
        new_pax: u32,
    ) -> BookingResult {
        let Some(old_pax) = self.book.remove_reservation(customer, old_slot) else {
            return Err(BookingRejection::NotFound);
        };
        if old_pax != pax {
            log::warn!(
                "Booking for {} at {} holds {} guests, not {}",
                customer,
                old_slot,
                old_pax,
                pax
            );
        }

        match self.book.add_reservation(customer.clone(), new_pax, new_slot) {
            Ok(index) => {
                self.forget_hold(customer, old_slot);
                log::info!(
                    "Moved {} from {} to {} ({} guests)",
                    customer,
                    old_slot,
                    new_slot,
                    new_pax
                );
                Ok(index)
            }
            Err(rejection) => {
                if let Err(restore) = self.book.add_reservation(customer.clone(), old_pax, old_slot)
                {
                    log::error!(
                        "Could not restore booking for {} at {}: {}",
                        customer,
                        old_slot,
                        restore
                    );
                }
                Err(rejection)
            }
        }
    }

    // ------------------------------------------------------------------
    // Sweeps
    // ------------------------------------------------------------------

    /// Hold tables for every booking in the slot containing `now`.
    ///
    /// Bookings that already hold a table are skipped, so running it again
    /// within the hour only picks up bookings added since, or ones that found
    /// no vacant table last time.
    pub fn sweep_promote(&mut self, now: NaiveDateTime) -> SweepReport {
        let slot = TimeSlot::containing(now);
        let held = self.held.entry(slot).or_default();

        let mut report = SweepReport::empty(slot);
        for reservation in self.book.reservations_at(slot) {
            if held.contains(&reservation.customer) {
                continue;
            }

            match self.registry.transition(
                reservation.pax,
                TableStatus::Vacant,
                TableStatus::Reserved,
            ) {
                Some(id) => {
                    held.insert(reservation.customer);
                    report.tables.push(id);
                }
                None => report.unmatched += 1,
            }
        }

        if report.unmatched > 0 {
            log::warn!(
                "{} booking(s) at {} found no vacant table",
                report.unmatched,
                slot
            );
        }
        log::info!("Promoted {} table(s) for {}", report.count(), slot);

        report
    }

    /// Release tables held for bookings in slots before the one containing
    /// `now`, and drop those bookings from the book
    pub fn sweep_expire(&mut self, now: NaiveDateTime) -> SweepReport {
        let slot = TimeSlot::containing(now);
        let expired = self.book.reservations_before(slot);
        let tables = self.registry.release_reservations(&expired);

        for reservation in &expired {
            self.book
                .remove_reservation(&reservation.customer, reservation.slot);
        }
        self.held = self.held.split_off(&slot);

        let report = SweepReport {
            slot,
            unmatched: expired.len() - tables.len(),
            tables,
        };
        log::info!(
            "Expired {} booking(s) before {}, released {} table(s)",
            expired.len(),
            slot,
            report.count()
        );

        report
    }

    fn forget_hold(&mut self, customer: &CustomerId, slot: TimeSlot) {
        if let Some(held) = self.held.get_mut(&slot) {
            held.remove(customer);
            if held.is_empty() {
                self.held.remove(&slot);
            }
        }
    }

    /// Promote bookings for the current hour
    pub fn promote_due_reservations(&mut self) -> SweepReport {
        self.sweep_promote(chrono::Local::now().naive_local())
    }

    /// Release bookings from earlier hours
    pub fn release_expired_reservations(&mut self) -> SweepReport {
        self.sweep_expire(chrono::Local::now().naive_local())
    }
}
