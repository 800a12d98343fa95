//! Reservation data models.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque customer identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hour-granularity time slot.
///
/// Always starts on the hour; minutes, seconds and sub-seconds are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot(NaiveDateTime);

impl TimeSlot {
    /// Slot containing the given instant (truncated to the top of the hour)
    pub fn containing(instant: NaiveDateTime) -> Self {
        let hour = TimeDelta::hours(i64::from(instant.hour()));
        Self(instant.date().and_time(NaiveTime::MIN) + hour)
    }

    /// Slot containing the current local time
    pub fn now() -> Self {
        Self::containing(chrono::Local::now().naive_local())
    }

    /// Start of the slot
    pub fn start(&self) -> NaiveDateTime {
        self.0
    }

    /// The following slot
    pub fn next(&self) -> Self {
        Self(self.0 + TimeDelta::hours(1))
    }

    /// The preceding slot
    pub fn previous(&self) -> Self {
        Self(self.0 - TimeDelta::hours(1))
    }
}

impl From<NaiveDateTime> for TimeSlot {
    fn from(instant: NaiveDateTime) -> Self {
        Self::containing(instant)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y %H:00"))
    }
}

/// A booking held by the reservation book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub customer: CustomerId,
    pub pax: u32,
    pub slot: TimeSlot,
}

impl Reservation {
    pub fn new(customer: CustomerId, pax: u32, slot: TimeSlot) -> Self {
        Self {
            customer,
            pax,
            slot,
        }
    }
}

/// Why the reservation book refused a booking.
///
/// Each reason maps onto a negative status code; codes the coordinator does
/// not know are carried through as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRejection {
    /// Every table of the needed size is already booked for the slot
    #[error("No table of the requested size is free in that slot")]
    SlotFull,

    /// Customer already holds a booking for the slot
    #[error("Customer already has a reservation in that slot")]
    AlreadyBooked,

    /// No reservation to change or cancel
    #[error("Reservation not found")]
    NotFound,

    /// Party size of zero
    #[error("Invalid party size")]
    InvalidPartySize,

    /// Book-specific reason
    #[error("Reservation rejected (code {0})")]
    Other(i32),
}

impl BookingRejection {
    /// Negative status code for this rejection
    pub fn code(&self) -> i32 {
        match self {
            BookingRejection::SlotFull => -1,
            BookingRejection::AlreadyBooked => -2,
            BookingRejection::NotFound => -3,
            BookingRejection::InvalidPartySize => -4,
            BookingRejection::Other(code) => *code,
        }
    }

    /// Map a negative status code back to a rejection
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => BookingRejection::SlotFull,
            -2 => BookingRejection::AlreadyBooked,
            -3 => BookingRejection::NotFound,
            -4 => BookingRejection::InvalidPartySize,
            other => BookingRejection::Other(other),
        }
    }
}

/// Result type for booking operations; `Ok` carries the reservation's index
/// within its slot
pub type BookingResult = Result<usize, BookingRejection>;

/// Signed status code for a booking result: the slot index on success, a
/// negative reason otherwise
pub fn status_code(result: &BookingResult) -> i32 {
    match result {
        Ok(index) => i32::try_from(*index).unwrap_or(i32::MAX),
        Err(rejection) => rejection.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 11, 7)
            .unwrap()
            .and_hms_milli_opt(hour, min, sec, 250)
            .unwrap()
    }

    #[test]
    fn test_slot_truncates_to_hour() {
        let slot = TimeSlot::containing(at(19, 42, 7));
        assert_eq!(slot.start(), at(19, 0, 0) - TimeDelta::milliseconds(250));
        assert_eq!(slot, TimeSlot::containing(at(19, 0, 0)));
    }

    #[test]
    fn test_slot_neighbours() {
        let slot = TimeSlot::containing(at(23, 30, 0));
        assert_eq!(slot.next().start().hour(), 0);
        assert_eq!(slot.previous().start().hour(), 22);
        assert!(slot.previous() < slot);
    }

    #[test]
    fn test_slot_display() {
        let slot = TimeSlot::containing(at(9, 15, 0));
        assert_eq!(slot.to_string(), "07/11/2021 09:00");
    }

    #[test]
    fn test_rejection_codes() {
        for rejection in [
            BookingRejection::SlotFull,
            BookingRejection::AlreadyBooked,
            BookingRejection::NotFound,
            BookingRejection::InvalidPartySize,
            BookingRejection::Other(-9),
        ] {
            assert!(rejection.code() < 0);
            assert_eq!(BookingRejection::from_code(rejection.code()), rejection);
        }
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code(&Ok(3)), 3);
        assert_eq!(status_code(&Err(BookingRejection::SlotFull)), -1);
    }
}
