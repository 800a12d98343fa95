//! Bookings loaded from configuration.

use chrono::NaiveDateTime;
use std::str::FromStr;
use thiserror::Error;

use super::models::{CustomerId, TimeSlot};

/// Hour format of a seed's slot, e.g. `2021-11-07T19`
const SLOT_FORMAT: &str = "%Y-%m-%dT%H";

/// Errors while parsing a booking seed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingSeedError {
    #[error("Expected CUSTOMER:PAX:YYYY-MM-DDTHH, got '{0}'")]
    Malformed(String),

    #[error("Invalid party size in '{0}'")]
    InvalidPax(String),

    #[error("Invalid slot in '{0}'")]
    InvalidSlot(String),
}

/// A booking to place when the book starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSeed {
    pub customer: CustomerId,
    pub pax: u32,
    pub slot: TimeSlot,
}

impl BookingSeed {
    pub fn new(customer: CustomerId, pax: u32, slot: TimeSlot) -> Self {
        Self {
            customer,
            pax,
            slot,
        }
    }

    /// Parse a comma-separated list of seeds; blank entries are skipped
    ///
    /// # Example
    ///
    /// ```
    /// use restaurant_tables::reservation::BookingSeed;
    ///
    /// let seeds = BookingSeed::parse_list("alice:4:2021-11-07T19, bob:2:2021-11-07T20").unwrap();
    /// assert_eq!(seeds.len(), 2);
    /// assert_eq!(seeds[1].pax, 2);
    /// ```
    pub fn parse_list(list: &str) -> Result<Vec<Self>, BookingSeedError> {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for BookingSeed {
    type Err = BookingSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split from the right so customer ids may contain ':'
        let mut parts = s.trim().rsplitn(3, ':');
        let (Some(slot), Some(pax), Some(customer)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(BookingSeedError::Malformed(s.to_string()));
        };

        let customer = customer.trim();
        if customer.is_empty() {
            return Err(BookingSeedError::Malformed(s.to_string()));
        }

        let pax = pax
            .trim()
            .parse()
            .map_err(|_| BookingSeedError::InvalidPax(s.to_string()))?;

        let start = NaiveDateTime::parse_from_str(
            &format!("{}:00", slot.trim()),
            &format!("{}:%M", SLOT_FORMAT),
        )
        .map_err(|_| BookingSeedError::InvalidSlot(s.to_string()))?;

        Ok(Self::new(
            CustomerId::new(customer),
            pax,
            TimeSlot::containing(start),
        ))
    }
}

impl std::fmt::Display for BookingSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.customer,
            self.pax,
            self.slot.start().format(SLOT_FORMAT)
        )
    }
}
