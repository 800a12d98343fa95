//! Table module: the floor's tables and their occupancy state machine.
//!
//! This module implements:
//! - Table: a fixed-capacity table with a vacant/reserved/occupied status
//! - TableRegistry: every table keyed by identifier, with status-guarded
//!   transitions and capacity-bucket queries
//! - RegistryConfig: the floor plan used to seed a registry
//!
//! ## Seating rule
//!
//! Tables come in pairs of seats. A party of `n` is only ever seated at a table
//! with exactly `n + n % 2` seats, never a larger one.
//!
//! ## Example
//!
//! ```
//! use restaurant_tables::table::{RegistryConfig, TableRegistry, TableStatus};
//!
//! let mut registry = TableRegistry::from_config(&RegistryConfig::default()).unwrap();
//!
//! let id = registry.seat_walk_in(3).unwrap();
//! assert_eq!(id, "T003");
//! assert_eq!(registry.get(&id).unwrap().status(), TableStatus::Occupied);
//! ```

pub mod config;
pub mod entities;
pub mod errors;
pub mod registry;

pub use config::{RegistryConfig, SeedParseError, TableSeed};
pub use entities::{Table, TableId, TableStatus, bucket_index, seating_capacity};
pub use errors::{TableError, TableResult};
pub use registry::TableRegistry;
