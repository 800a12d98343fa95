//! Table entities and the seating rule.

use serde::{Deserialize, Serialize};

use super::errors::{TableError, TableResult};

/// Table identifier type
pub type TableId = String;

/// Smallest table the floor can hold
pub const MIN_CAPACITY: u32 = 2;

/// Occupancy status of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Vacant,
    Reserved,
    Occupied,
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Vacant => write!(f, "vacant"),
            TableStatus::Reserved => write!(f, "reserved"),
            TableStatus::Occupied => write!(f, "occupied"),
        }
    }
}

/// Table size needed to seat a party.
///
/// Tables come in pairs of seats, so a party of `n` sits at a table of
/// `n + n % 2`. Returns `None` when that size does not fit in a `u32`.
pub fn seating_capacity(pax: u32) -> Option<u32> {
    pax.checked_add(pax % 2)
}

/// Index of a capacity inside the bucket vector.
///
/// Returns `None` for capacities no table can have.
pub fn bucket_index(capacity: u32) -> Option<usize> {
    if capacity < MIN_CAPACITY || capacity % 2 != 0 {
        return None;
    }
    Some((capacity / 2 - 1) as usize)
}

/// A single dining table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    capacity: u32,
    status: TableStatus,
}

impl Table {
    /// Create a vacant table.
    ///
    /// # Errors
    ///
    /// `TableError::InvalidCapacity` if `capacity` is zero or odd.
    pub fn new(id: impl Into<TableId>, capacity: u32) -> TableResult<Self> {
        if bucket_index(capacity).is_none() {
            return Err(TableError::InvalidCapacity(capacity));
        }

        Ok(Self {
            id: id.into(),
            capacity,
            status: TableStatus::Vacant,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    /// Overwrite the status. Guards live in the registry.
    pub fn set_status(&mut self, status: TableStatus) {
        self.status = status;
    }

    pub fn is_vacant(&self) -> bool {
        self.status == TableStatus::Vacant
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} seats, {})", self.id, self.capacity, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seating_capacity_rounds_up_to_pairs() {
        assert_eq!(seating_capacity(1), Some(2));
        assert_eq!(seating_capacity(3), Some(4));
        assert_eq!(seating_capacity(4), Some(4));
        assert_eq!(seating_capacity(7), Some(8));
    }

    #[test]
    fn test_seating_capacity_overflow() {
        assert_eq!(seating_capacity(u32::MAX), None);
        assert_eq!(seating_capacity(u32::MAX - 1), Some(u32::MAX - 1));
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(bucket_index(2), Some(0));
        assert_eq!(bucket_index(10), Some(4));
        assert_eq!(bucket_index(0), None);
        assert_eq!(bucket_index(5), None);
    }

    #[test]
    fn test_new_table_is_vacant() {
        let table = Table::new("T001", 4).expect("even capacity is valid");
        assert_eq!(table.id(), "T001");
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.status(), TableStatus::Vacant);
    }

    #[test]
    fn test_new_table_rejects_odd_and_zero_capacity() {
        assert_eq!(Table::new("T001", 3), Err(TableError::InvalidCapacity(3)));
        assert_eq!(Table::new("T001", 0), Err(TableError::InvalidCapacity(0)));
    }

    #[test]
    fn test_set_status_is_unconditional() {
        let mut table = Table::new("T001", 2).unwrap();
        table.set_status(TableStatus::Occupied);
        table.set_status(TableStatus::Reserved);
        assert_eq!(table.status(), TableStatus::Reserved);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TableStatus::Reserved).unwrap();
        assert_eq!(json, "\"reserved\"");
    }
}
