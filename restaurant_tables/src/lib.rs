//! # Restaurant Tables
//!
//! Table allocation for a restaurant floor: seating walk-ins, holding tables for
//! hourly reservations, and releasing them when bookings are cancelled or run out.
//!
//! Every table moves through a small state machine:
//!
//! - **Vacant** → **Reserved**: a booking's hour arrives, or a table is held by hand
//! - **Reserved** → **Vacant**: the booking is cancelled or its hour has passed
//! - **Vacant** / **Reserved** → **Occupied**: a party is seated
//! - **Occupied** → **Vacant**: the party leaves
//!
//! All four guarded moves are the same operation: find the first table (in
//! identifier order) of the party's size in the required state and move it.
//!
//! ## Core Modules
//!
//! - [`table`]: Tables, the registry, and the floor plan
//! - [`reservation`]: Time slots, bookings, and the reservation book
//! - [`allocation`]: The coordinator tying both together and the hourly sweeps
//!
//! ## Example
//!
//! ```
//! use restaurant_tables::{AllocationCoordinator, RegistryConfig};
//!
//! let mut coordinator: AllocationCoordinator =
//!     AllocationCoordinator::from_config(&RegistryConfig::default()).unwrap();
//!
//! assert_eq!(coordinator.seat_walk_in(2).unwrap(), "T001");
//! assert_eq!(coordinator.seat_walk_in(2).unwrap(), "T002");
//! assert!(!coordinator.check_availability(2));
//! ```

/// Orchestration of tables and reservations.
pub mod allocation;
pub use allocation::{AllocationCoordinator, SharedCoordinator, SweepOutcome, SweepReport};

/// Reservation book and time slots.
pub mod reservation;
pub use reservation::{
    BookingRejection, BookingResult, BookingSeed, CustomerId, InMemoryReservationBook,
    Reservation, ReservationBook, TimeSlot,
};

/// Tables and the table registry.
pub mod table;
pub use table::{
    RegistryConfig, Table, TableError, TableId, TableRegistry, TableResult, TableSeed,
    TableStatus, seating_capacity,
};
