//! In-memory reservation book.

use std::collections::BTreeMap;

use super::{
    book::ReservationBook,
    models::{BookingRejection, BookingResult, CustomerId, Reservation, TimeSlot},
};
use crate::table::{bucket_index, seating_capacity};

/// Reservation book kept in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationBook {
    /// Tables per capacity, indexed by `capacity / 2 - 1`
    buckets: Vec<usize>,

    /// Bookings per slot, in booking order
    slots: BTreeMap<TimeSlot, Vec<Reservation>>,
}

impl InMemoryReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity_buckets(&self) -> &[usize] {
        &self.buckets
    }

    /// Number of bookings across all slots
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn tables_of(&self, capacity: u32) -> usize {
        bucket_index(capacity)
            .and_then(|index| self.buckets.get(index).copied())
            .unwrap_or(0)
    }

    fn booked_in(&self, slot: TimeSlot, capacity: u32) -> usize {
        self.slots.get(&slot).map_or(0, |bookings| {
            bookings
                .iter()
                .filter(|r| seating_capacity(r.pax) == Some(capacity))
                .count()
        })
    }
}

impl ReservationBook for InMemoryReservationBook {
    fn set_capacity_buckets(&mut self, buckets: Vec<usize>) {
        log::debug!("Capacity buckets set to {:?}", buckets);
        self.buckets = buckets;
    }

    fn grow_bucket(&mut self, capacity: u32) {
        let Some(index) = bucket_index(capacity) else {
            log::warn!("Ignoring bucket growth for invalid capacity {}", capacity);
            return;
        };

        if self.buckets.len() <= index {
            self.buckets.resize(index + 1, 0);
        }
        self.buckets[index] += 1;
    }

    fn query_bucket(&self, slot: TimeSlot, pax: u32) -> bool {
        let Some(capacity) = seating_capacity(pax) else {
            return false;
        };
        self.booked_in(slot, capacity) < self.tables_of(capacity)
    }

    fn add_reservation(&mut self, customer: CustomerId, pax: u32, slot: TimeSlot) -> BookingResult {
        if pax == 0 {
            return Err(BookingRejection::InvalidPartySize);
        }
        if self.check_reservation(&customer, slot) {
            return Err(BookingRejection::AlreadyBooked);
        }
        if !self.query_bucket(slot, pax) {
            return Err(BookingRejection::SlotFull);
        }

        let bookings = self.slots.entry(slot).or_default();
        bookings.push(Reservation::new(customer, pax, slot));

        Ok(bookings.len() - 1)
    }

    fn remove_reservation(&mut self, customer: &CustomerId, slot: TimeSlot) -> Option<u32> {
        let bookings = self.slots.get_mut(&slot)?;
        let position = bookings.iter().position(|r| &r.customer == customer)?;
        let removed = bookings.remove(position);

        if bookings.is_empty() {
            self.slots.remove(&slot);
        }

        Some(removed.pax)
    }

    fn check_reservation(&self, customer: &CustomerId, slot: TimeSlot) -> bool {
        self.slots
            .get(&slot)
            .is_some_and(|bookings| bookings.iter().any(|r| &r.customer == customer))
    }

    fn reservations_at(&self, slot: TimeSlot) -> Vec<Reservation> {
        self.slots.get(&slot).cloned().unwrap_or_default()
    }

    fn reservations_before(&self, slot: TimeSlot) -> Vec<Reservation> {
        self.slots
            .range(..slot)
            .flat_map(|(_, bookings)| bookings.iter().cloned())
            .collect()
    }
}
