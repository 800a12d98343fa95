//! Interface of the reservation book consumed by the allocation coordinator.

use super::models::{BookingResult, CustomerId, Reservation, TimeSlot};

/// Store of reservations bucketed by time slot and table capacity.
///
/// The book decides whether a booking fits by comparing the bookings in a
/// slot against its capacity buckets (`buckets[capacity / 2 - 1]` tables of
/// each size). It never touches tables itself.
pub trait ReservationBook {
    /// Replace the capacity buckets with a fresh count from the registry
    fn set_capacity_buckets(&mut self, buckets: Vec<usize>);

    /// Account for one more table of `capacity` seats
    fn grow_bucket(&mut self, capacity: u32);

    /// Whether a party of `pax` still fits in `slot`
    fn query_bucket(&self, slot: TimeSlot, pax: u32) -> bool;

    /// Book a table for `customer`.
    ///
    /// Returns the reservation's index within its slot, or why it was refused.
    fn add_reservation(&mut self, customer: CustomerId, pax: u32, slot: TimeSlot) -> BookingResult;

    /// Cancel a booking, returning the party size it held
    fn remove_reservation(&mut self, customer: &CustomerId, slot: TimeSlot) -> Option<u32>;

    /// Whether `customer` holds a booking for `slot`
    fn check_reservation(&self, customer: &CustomerId, slot: TimeSlot) -> bool;

    /// Bookings for exactly `slot`
    fn reservations_at(&self, slot: TimeSlot) -> Vec<Reservation>;

    /// Bookings for any slot strictly before `slot`
    fn reservations_before(&self, slot: TimeSlot) -> Vec<Reservation>;
}
