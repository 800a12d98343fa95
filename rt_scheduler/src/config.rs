//! Scheduler configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use restaurant_tables::{reservation::BookingSeed, table::RegistryConfig};
use std::net::SocketAddr;

/// Complete scheduler configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Floor plan the registry starts with
    pub tables: RegistryConfig,
    /// Bookings placed before the first sweep
    pub reservations: Vec<BookingSeed>,
    /// Seconds between sweeps
    pub sweep_interval_secs: u64,
    /// Prometheus exporter address, if metrics are enabled
    pub metrics_bind: Option<SocketAddr>,
}

impl SchedulerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `tables_override` - Optional `ID:PAX,...` list (from CLI args)
    /// * `reservations_override` - Optional `CUSTOMER:PAX:YYYY-MM-DDTHH,...` list (from CLI args)
    /// * `interval_override` - Optional sweep interval in seconds (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<SchedulerConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but cannot be parsed
    pub fn from_env(
        tables_override: Option<String>,
        reservations_override: Option<String>,
        interval_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let tables = match tables_override.or_else(|| std::env::var("SEATING_TABLES").ok()) {
            Some(list) => RegistryConfig::parse_list(&list).map_err(|e| ConfigError::Invalid {
                var: "SEATING_TABLES".to_string(),
                reason: e.to_string(),
            })?,
            None => RegistryConfig::default(),
        };

        let reservations = match reservations_override.or_else(|| std::env::var("RESERVATIONS").ok())
        {
            Some(list) => BookingSeed::parse_list(&list).map_err(|e| ConfigError::Invalid {
                var: "RESERVATIONS".to_string(),
                reason: e.to_string(),
            })?,
            None => Vec::new(),
        };

        let sweep_interval_secs =
            interval_override.unwrap_or_else(|| parse_env_or("SWEEP_INTERVAL_SECS", 60));

        let metrics_bind = match std::env::var("METRICS_BIND") {
            Ok(addr) => Some(addr.parse().map_err(|_| ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("'{}' is not a socket address", addr),
            })?),
            Err(_) => None,
        };

        Ok(SchedulerConfig {
            tables,
            reservations,
            sweep_interval_secs,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SWEEP_INTERVAL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.tables
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "SEATING_TABLES".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::remove_var("SEATING_TABLES");
            std::env::remove_var("SWEEP_INTERVAL_SECS");
            std::env::remove_var("METRICS_BIND");
            std::env::remove_var("RESERVATIONS");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();
        let config = SchedulerConfig::from_env(None, None, None).unwrap();

        assert_eq!(config.tables, RegistryConfig::default());
        assert!(config.reservations.is_empty());
        assert_eq!(config.sweep_interval_secs, 60);
        assert!(config.metrics_bind.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_values() {
        clear_env();
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::set_var("SEATING_TABLES", "A1:2,A2:3");
            std::env::set_var("SWEEP_INTERVAL_SECS", "15");
            std::env::set_var("METRICS_BIND", "127.0.0.1:9090");
        }

        let config = SchedulerConfig::from_env(None, None, None).unwrap();
        assert_eq!(config.tables.tables.len(), 2);
        assert_eq!(config.tables.tables[1].pax, 3);
        assert_eq!(config.sweep_interval_secs, 15);
        assert_eq!(config.metrics_bind, Some("127.0.0.1:9090".parse().unwrap()));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_beat_environment() {
        clear_env();
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::set_var("SEATING_TABLES", "A1:2");
            std::env::set_var("SWEEP_INTERVAL_SECS", "15");
        }

        let config = SchedulerConfig::from_env(Some("B1:4,B2:4".to_string()), None, Some(5)).unwrap();
        assert_eq!(config.tables.tables[0].id, "B1");
        assert_eq!(config.sweep_interval_secs, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_reservations_from_environment_and_override() {
        clear_env();
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::set_var("RESERVATIONS", "alice:4:2021-11-07T19");
        }

        let config = SchedulerConfig::from_env(None, None, None).unwrap();
        assert_eq!(config.reservations.len(), 1);
        assert_eq!(config.reservations[0].pax, 4);

        let config = SchedulerConfig::from_env(
            None,
            Some("bob:2:2021-11-07T18,carol:6:2021-11-07T20".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(config.reservations.len(), 2);
        assert_eq!(config.reservations[1].to_string(), "carol:6:2021-11-07T20");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_reservations_rejected() {
        clear_env();
        let err = SchedulerConfig::from_env(None, Some("alice:4".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("RESERVATIONS"));
    }

    #[test]
    #[serial]
    fn test_malformed_tables_rejected() {
        clear_env();
        let err = SchedulerConfig::from_env(Some("A1-2".to_string()), None, None).unwrap_err();
        assert!(err.to_string().contains("SEATING_TABLES"));
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let config = SchedulerConfig {
            tables: RegistryConfig::default(),
            reservations: Vec::new(),
            sweep_interval_secs: 0,
            metrics_bind: None,
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_validation_rejects_duplicate_tables() {
        let config = SchedulerConfig {
            tables: RegistryConfig::parse_list("A1:2,A1:4").unwrap(),
            reservations: Vec::new(),
            sweep_interval_secs: 60,
            metrics_bind: None,
        };

        assert!(config.validate().is_err());
    }
}
