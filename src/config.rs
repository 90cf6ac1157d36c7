//! Configuration management for Floodgate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{FloodgateError, Result};

/// Main configuration for the Floodgate demo driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloodgateConfig {
    /// Rate limiter configuration
    #[serde(default)]
    pub limiter: LimiterConfig,

    /// Driver configuration
    #[serde(default)]
    pub driver: DriverConfig,
}

/// Rate limiter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Burst capacity: maximum number of tokens held at once
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Period between refill attempts, in milliseconds
    #[serde(default = "default_refill_interval_ms")]
    pub refill_interval_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            refill_interval_ms: default_refill_interval_ms(),
        }
    }
}

fn default_capacity() -> u32 {
    5
}

fn default_refill_interval_ms() -> u64 {
    500
}

impl LimiterConfig {
    /// Get the refill interval as a [`Duration`].
    pub fn refill_interval(&self) -> Duration {
        Duration::from_millis(self.refill_interval_ms)
    }

    /// Validate the configuration.
    ///
    /// Rejects a zero capacity or a zero refill interval, the same
    /// constraints [`RateLimiter::new`] enforces at construction.
    ///
    /// [`RateLimiter::new`]: crate::RateLimiter::new
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(FloodgateError::InvalidCapacity(self.capacity));
        }
        if self.refill_interval_ms == 0 {
            return Err(FloodgateError::InvalidInterval);
        }
        Ok(())
    }
}

/// Demo driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Number of sample requests to issue
    #[serde(default = "default_requests")]
    pub requests: u32,

    /// Delay between sample requests, in milliseconds
    #[serde(default = "default_cadence_ms")]
    pub cadence_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            cadence_ms: default_cadence_ms(),
        }
    }
}

fn default_requests() -> u32 {
    10
}

fn default_cadence_ms() -> u64 {
    200
}

impl DriverConfig {
    /// Get the request cadence as a [`Duration`].
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }
}

impl FloodgateConfig {
    /// Load configuration from a YAML file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| FloodgateError::Config(e.to_string()))
    }
}
