//! Table error types.

use thiserror::Error;

use super::entities::{TableId, TableStatus};

/// Table registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table with this identifier already exists
    #[error("Table {0} already exists")]
    DuplicateIdentifier(TableId),

    /// No table with this identifier
    #[error("Table {0} not found")]
    NotFound(TableId),

    /// Table is reserved or occupied
    #[error("Table {id} is {status}, not vacant")]
    NotVacant { id: TableId, status: TableStatus },

    /// Capacity must be an even number of seats, at least 2
    #[error("Invalid table capacity: {0}")]
    InvalidCapacity(u32),

    /// No table of the right size is in the required state
    #[error("No table available for a party of {pax}")]
    NoTableAvailable { pax: u32 },

    /// Table was removed during an update and could not be put back
    #[error("Table {0} was removed but could not be re-added")]
    ReinsertionFailed(TableId),
}

impl TableError {
    /// Whether this error means the registry lost data.
    ///
    /// Fatal errors must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TableError::ReinsertionFailed(_))
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
