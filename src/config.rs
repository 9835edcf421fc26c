//! Configuration Module
//!
//! Loads settings for the optional background reaper from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Environment variable holding the reaper interval in milliseconds.
pub const REAPER_INTERVAL_ENV: &str = "AGED_CACHE_REAPER_INTERVAL_MS";

const DEFAULT_REAPER_INTERVAL_MS: u64 = 1000;

/// Background reaper configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperConfig {
    /// Milliseconds between reaper passes
    pub interval_ms: u64,
}

impl ReaperConfig {
    /// Creates a config with the given interval.
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// Creates a new ReaperConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AGED_CACHE_REAPER_INTERVAL_MS` - Reaper interval in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        Self {
            interval_ms: env::var(REAPER_INTERVAL_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REAPER_INTERVAL_MS),
        }
    }

    /// Rejects settings the reaper cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "reaper interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the interval as a Duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REAPER_INTERVAL_MS,
        }
    }
}
