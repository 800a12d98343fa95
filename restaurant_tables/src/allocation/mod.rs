//! Allocation module orchestrating tables and reservations.
//!
//! This module implements:
//! - AllocationCoordinator: owns a table registry and a reservation book and
//!   keeps them consistent (capacity buckets, cancellations, rebookings)
//! - Hourly sweeps: promoting bookings for the current hour to held tables and
//!   releasing tables held for bookings from earlier hours
//! - SharedCoordinator: a mutex-guarded handle for use across Tokio tasks
//!
//! ## Sweeps
//!
//! The coordinator has no timer of its own. Something outside calls
//! `sweep_expire` and `sweep_promote` periodically; each call is synchronous
//! and safe to repeat for the same hour.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use restaurant_tables::allocation::AllocationCoordinator;
//! use restaurant_tables::reservation::{CustomerId, TimeSlot};
//! use restaurant_tables::table::{RegistryConfig, TableStatus};
//!
//! let mut coordinator: AllocationCoordinator =
//!     AllocationCoordinator::from_config(&RegistryConfig::default()).unwrap();
//!
//! let seven_pm = NaiveDate::from_ymd_opt(2021, 11, 7).unwrap().and_hms_opt(19, 0, 0).unwrap();
//! coordinator
//!     .add_reservation(6, CustomerId::from("alice"), TimeSlot::containing(seven_pm))
//!     .unwrap();
//!
//! let report = coordinator.sweep_promote(seven_pm);
//! assert_eq!(report.tables, vec!["T006".to_string()]);
//! assert_eq!(
//!     coordinator.registry().get("T006").unwrap().status(),
//!     TableStatus::Reserved
//! );
//! ```

pub mod coordinator;
pub mod shared;

pub use coordinator::{AllocationCoordinator, SweepReport};
pub use shared::{SharedCoordinator, SweepOutcome};
