//! Discovery run configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary)
//! and can be overridden from the command line.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::DiscoveryError;
use crate::utils::constants::{DEFAULT_ANCHOR_SYMBOL, WETH};

/// Settings of a single discovery run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Address of the token every cycle starts and ends at
    pub anchor_address: String,
    /// Symbol tried when `anchor_address` is not in the token set
    pub anchor_symbol: String,
    /// Shortest cycle to emit, in swaps
    pub min_depth: usize,
    /// Longest cycle to emit, in swaps
    pub max_depth: usize,
    /// Buffered paths that trigger a flush
    pub path_batch_size: usize,
    /// Period of the background flush
    pub flush_interval: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            anchor_address: WETH.to_string(),
            anchor_symbol: DEFAULT_ANCHOR_SYMBOL.to_string(),
            min_depth: 3,
            max_depth: 3,
            path_batch_size: 500,
            flush_interval: Duration::from_millis(5_000),
        }
    }
}

impl DiscoveryConfig {
    /// Reads the configuration from `ORBIT_*` environment variables, falling
    /// back to the defaults for unset ones.
    ///
    /// # Environment Variables
    /// * `ORBIT_ANCHOR_ADDRESS`
    /// * `ORBIT_ANCHOR_SYMBOL`
    /// * `ORBIT_MIN_DEPTH`
    /// * `ORBIT_MAX_DEPTH`
    /// * `ORBIT_PATH_BATCH_SIZE`
    /// * `ORBIT_FLUSH_INTERVAL_MS`
    ///
    /// # Errors
    /// * If a variable is set but cannot be parsed
    /// * If the resulting configuration is out of range
    pub fn from_env() -> Result<Self, DiscoveryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DiscoveryError> {
        let defaults = Self::default();
        let config = Self {
            anchor_address: lookup("ORBIT_ANCHOR_ADDRESS").unwrap_or(defaults.anchor_address),
            anchor_symbol: lookup("ORBIT_ANCHOR_SYMBOL").unwrap_or(defaults.anchor_symbol),
            min_depth: parse_or(&lookup, "ORBIT_MIN_DEPTH", defaults.min_depth)?,
            max_depth: parse_or(&lookup, "ORBIT_MAX_DEPTH", defaults.max_depth)?,
            path_batch_size: parse_or(&lookup, "ORBIT_PATH_BATCH_SIZE", defaults.path_batch_size)?,
            flush_interval: Duration::from_millis(parse_or(
                &lookup,
                "ORBIT_FLUSH_INTERVAL_MS",
                u64::try_from(defaults.flush_interval.as_millis()).unwrap_or(u64::MAX),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the depth bounds, batch size and flush interval.
    ///
    /// # Errors
    /// * If `min_depth` is zero or greater than `max_depth`
    /// * If `path_batch_size` or `flush_interval` is zero
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.min_depth < 1 {
            return Err(DiscoveryError::InvalidConfig(
                "min_depth must be at least 1".to_string(),
            ));
        }
        if self.max_depth < self.min_depth {
            return Err(DiscoveryError::InvalidConfig(format!(
                "max_depth ({}) must not be lower than min_depth ({})",
                self.max_depth, self.min_depth
            )));
        }
        if self.path_batch_size == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "path_batch_size must be positive".to_string(),
            ));
        }
        if self.flush_interval.is_zero() {
            return Err(DiscoveryError::InvalidConfig(
                "flush_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, DiscoveryError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DiscoveryError::InvalidConfig(format!("{key}={raw} is not a valid value"))),
        None => Ok(default),
    }
}
