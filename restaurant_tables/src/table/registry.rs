//! Table registry owning every table on the floor.

use std::collections::BTreeMap;

use super::{
    config::RegistryConfig,
    entities::{Table, TableId, TableStatus, bucket_index, seating_capacity},
    errors::{TableError, TableResult},
};
use crate::reservation::Reservation;

/// Registry of tables keyed by identifier.
///
/// Iteration is in identifier order, which makes first-match allocation
/// deterministic: among equal candidates the lowest identifier wins.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: BTreeMap<TableId, Table>,
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a floor plan
    ///
    /// # Arguments
    ///
    /// * `config` - Tables to create
    ///
    /// # Returns
    ///
    /// * `TableResult<TableRegistry>` - Populated registry, or the first seed
    ///   that could not be added
    pub fn from_config(config: &RegistryConfig) -> TableResult<Self> {
        let mut registry = Self::new();
        for seed in &config.tables {
            registry.add_table(seed.id.clone(), seed.pax)?;
        }
        Ok(registry)
    }

    /// Add a table sized for a party of `pax`
    ///
    /// # Arguments
    ///
    /// * `id` - Table identifier
    /// * `pax` - Party size; the table gets `pax + pax % 2` seats
    ///
    /// # Returns
    ///
    /// * `TableResult<TableId>` - Identifier of the new table
    pub fn add_table(&mut self, id: impl Into<TableId>, pax: u32) -> TableResult<TableId> {
        let id = id.into();
        if self.tables.contains_key(&id) {
            return Err(TableError::DuplicateIdentifier(id));
        }

        let capacity = seating_capacity(pax).ok_or(TableError::InvalidCapacity(pax))?;
        let table = Table::new(id.clone(), capacity)?;
        log::info!("Added table {}", table);
        self.tables.insert(id.clone(), table);

        Ok(id)
    }

    /// Remove a vacant table
    ///
    /// # Returns
    ///
    /// * `TableResult<Table>` - The removed table; `NotFound` if absent,
    ///   `NotVacant` if it is reserved or occupied
    pub fn remove_table(&mut self, id: &str) -> TableResult<Table> {
        let table = self
            .tables
            .get(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;

        if !table.is_vacant() {
            return Err(TableError::NotVacant {
                id: id.to_string(),
                status: table.status(),
            });
        }

        let removed = self
            .tables
            .remove(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        log::info!("Removed table {}", removed.id());

        Ok(removed)
    }

    /// Resize a vacant table by removing it and adding it back
    ///
    /// # Arguments
    ///
    /// * `id` - Table identifier
    /// * `pax` - New party size
    ///
    /// # Returns
    ///
    /// * `TableResult<()>` - Removal errors pass through unchanged;
    ///   `ReinsertionFailed` if the table is gone and could not be re-added
    pub fn update_table(&mut self, id: &str, pax: u32) -> TableResult<()> {
        let capacity = seating_capacity(pax).ok_or(TableError::InvalidCapacity(pax))?;
        if bucket_index(capacity).is_none() {
            return Err(TableError::InvalidCapacity(capacity));
        }

        self.remove_table(id)?;

        match self.add_table(id, pax) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("Table {} lost during update: {}", id, e);
                Err(TableError::ReinsertionFailed(id.to_string()))
            }
        }
    }

    /// Whether a vacant table exactly fits a party of `pax`
    pub fn check_availability(&self, pax: u32) -> bool {
        let Some(capacity) = seating_capacity(pax) else {
            return false;
        };
        self.tables
            .values()
            .any(|table| table.capacity() == capacity && table.is_vacant())
    }

    /// Move the first matching table from `required` to `desired`.
    ///
    /// A table matches when its capacity equals the rounded party size and its
    /// status equals `required`. Tables are scanned in identifier order.
    ///
    /// # Returns
    ///
    /// * `Option<TableId>` - Identifier of the table that changed, or `None`
    ///   if no table matched
    pub fn transition(
        &mut self,
        pax: u32,
        required: TableStatus,
        desired: TableStatus,
    ) -> Option<TableId> {
        let capacity = seating_capacity(pax)?;
        let table = self
            .tables
            .values_mut()
            .find(|table| table.capacity() == capacity && table.status() == required)?;

        table.set_status(desired);
        log::debug!(
            "Table {} moved from {} to {}",
            table.id(),
            required,
            desired
        );

        Some(table.id().to_string())
    }

    /// Seat a party without a booking at a vacant table
    pub fn seat_walk_in(&mut self, pax: u32) -> TableResult<TableId> {
        self.transition(pax, TableStatus::Vacant, TableStatus::Occupied)
            .ok_or(TableError::NoTableAvailable { pax })
    }

    /// Seat a party with a booking at a table held for them
    pub fn seat_booked(&mut self, pax: u32) -> TableResult<TableId> {
        self.transition(pax, TableStatus::Reserved, TableStatus::Occupied)
            .ok_or(TableError::NoTableAvailable { pax })
    }

    /// Hold a vacant table for a party
    pub fn reserve(&mut self, pax: u32) -> TableResult<TableId> {
        self.transition(pax, TableStatus::Vacant, TableStatus::Reserved)
            .ok_or(TableError::NoTableAvailable { pax })
    }

    /// Give up a held table
    pub fn release(&mut self, pax: u32) -> TableResult<TableId> {
        self.transition(pax, TableStatus::Reserved, TableStatus::Vacant)
            .ok_or(TableError::NoTableAvailable { pax })
    }

    /// Free a table regardless of its status
    pub fn unseat(&mut self, id: &str) -> TableResult<()> {
        let table = self
            .tables
            .get_mut(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        table.set_status(TableStatus::Vacant);
        Ok(())
    }

    /// Release one held table per reservation
    pub fn release_reservations(&mut self, reservations: &[Reservation]) -> Vec<TableId> {
        reservations
            .iter()
            .filter_map(|r| self.transition(r.pax, TableStatus::Reserved, TableStatus::Vacant))
            .collect()
    }

    /// Count of tables per capacity, indexed by `capacity / 2 - 1`
    pub fn bucket_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for table in self.tables.values() {
            if let Some(index) = bucket_index(table.capacity()) {
                if counts.len() <= index {
                    counts.resize(index + 1, 0);
                }
                counts[index] += 1;
            }
        }
        counts
    }

    /// Force every table back to vacant
    pub fn reset_all(&mut self) {
        for table in self.tables.values_mut() {
            table.set_status(TableStatus::Vacant);
        }
        log::warn!("All {} tables reset to vacant", self.tables.len());
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    /// All tables in identifier order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Vacant tables in identifier order
    pub fn available_tables(&self) -> Vec<&Table> {
        self.tables.values().filter(|t| t.is_vacant()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
