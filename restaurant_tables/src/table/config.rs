//! Floor plan configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::entities::TableId;

/// Errors while parsing a table seed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedParseError {
    #[error("Expected ID:PAX, got '{0}'")]
    Malformed(String),

    #[error("Invalid party size in '{0}'")]
    InvalidPax(String),
}

/// A table to create when the registry starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSeed {
    /// Table identifier
    pub id: TableId,

    /// Party size the table must seat (rounded up to pairs)
    pub pax: u32,
}

impl TableSeed {
    pub fn new(id: impl Into<TableId>, pax: u32) -> Self {
        Self { id: id.into(), pax }
    }
}

impl FromStr for TableSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, pax) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| SeedParseError::Malformed(s.to_string()))?;

        let id = id.trim();
        if id.is_empty() {
            return Err(SeedParseError::Malformed(s.to_string()));
        }

        let pax = pax
            .trim()
            .parse()
            .map_err(|_| SeedParseError::InvalidPax(s.to_string()))?;

        Ok(Self::new(id, pax))
    }
}

impl std::fmt::Display for TableSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.pax)
    }
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Tables present at startup
    pub tables: Vec<TableSeed>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            tables: vec![
                TableSeed::new("T001", 2),
                TableSeed::new("T002", 2),
                TableSeed::new("T003", 4),
                TableSeed::new("T004", 4),
                TableSeed::new("T005", 4),
                TableSeed::new("T006", 6),
                TableSeed::new("T007", 8),
                TableSeed::new("T008", 10),
            ],
        }
    }
}

impl RegistryConfig {
    /// Empty floor plan
    pub fn empty() -> Self {
        Self { tables: Vec::new() }
    }

    /// Parse a comma-separated list of `ID:PAX` seeds.
    ///
    /// Blank entries are skipped, so a trailing comma is accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use restaurant_tables::table::RegistryConfig;
    ///
    /// let config = RegistryConfig::parse_list("A1:2, A2:4,").unwrap();
    /// assert_eq!(config.tables.len(), 2);
    /// ```
    pub fn parse_list(list: &str) -> Result<Self, SeedParseError> {
        let tables = list
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<TableSeed>, _>>()?;

        Ok(Self { tables })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tables.is_empty() {
            return Err("At least one table is required".to_string());
        }

        let mut seen = std::collections::BTreeSet::new();
        for seed in &self.tables {
            if seed.pax == 0 {
                return Err(format!("Table {} must seat at least one guest", seed.id));
            }
            if !seen.insert(seed.id.as_str()) {
                return Err(format!("Table {} is listed twice", seed.id));
            }
        }

        Ok(())
    }
}
