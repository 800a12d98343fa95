//! Reservation module: bookings grouped into hourly time slots.
//!
//! This module implements:
//! - ReservationBook: the interface the allocation coordinator consumes
//! - InMemoryReservationBook: a book kept in process memory
//! - TimeSlot: hour-granularity slots, truncated arithmetically
//! - BookingRejection: reasons a booking was refused, with signed status codes
//! - BookingSeed: bookings given as `CUSTOMER:PAX:YYYY-MM-DDTHH` in configuration
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use restaurant_tables::reservation::{
//!     BookingRejection, CustomerId, InMemoryReservationBook, ReservationBook, TimeSlot,
//! };
//!
//! let mut book = InMemoryReservationBook::new();
//! book.set_capacity_buckets(vec![1]);
//!
//! let dinner = TimeSlot::containing(
//!     NaiveDate::from_ymd_opt(2021, 11, 7).unwrap().and_hms_opt(19, 30, 0).unwrap(),
//! );
//! assert_eq!(book.add_reservation(CustomerId::from("alice"), 2, dinner), Ok(0));
//! assert_eq!(
//!     book.add_reservation(CustomerId::from("bob"), 2, dinner),
//!     Err(BookingRejection::SlotFull)
//! );
//! ```

pub mod book;
pub mod memory;
pub mod models;
pub mod seed;

pub use book::ReservationBook;
pub use memory::InMemoryReservationBook;
pub use models::{
    BookingRejection, BookingResult, CustomerId, Reservation, TimeSlot, status_code,
};
pub use seed::{BookingSeed, BookingSeedError};
