//! Configuration loading and representation.

use thiserror::Error;

pub const FIRST_ID_VAR: &str = "SWEETSHOP_FIRST_ID";
pub const STORE_CAPACITY_VAR: &str = "SWEETSHOP_STORE_CAPACITY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Inventory settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// First id handed out to drafts; already-taken ids are skipped.
    pub first_id: u64,
    /// Pre-allocated catalogue slots.
    pub initial_capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            first_id: 1,
            initial_capacity: 0,
        }
    }
}

impl InventoryConfig {
    /// Read `SWEETSHOP_FIRST_ID` / `SWEETSHOP_STORE_CAPACITY`; unset values
    /// keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(FIRST_ID_VAR) {
            let first_id = parse::<u64>(FIRST_ID_VAR, &raw)?;
            if first_id == 0 {
                return Err(ConfigError::Invalid {
                    key: FIRST_ID_VAR,
                    value: raw,
                    reason: "must be a positive integer".to_string(),
                });
            }
            config.first_id = first_id;
        }

        if let Some(raw) = lookup(STORE_CAPACITY_VAR) {
            config.initial_capacity = parse::<usize>(STORE_CAPACITY_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
