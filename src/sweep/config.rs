//! Configuration types for sweep operations

use crate::sweep::error::SweepError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a sweep operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Network prefix to sweep, in CIDR notation
    pub prefix: String,
    /// Nameserver every query is sent to, as `host:port`
    pub nameserver: String,
    /// Number of concurrent resolver workers (default: 32)
    pub workers: usize,
    /// Timeout for individual lookups (default: 1s)
    pub lookup_timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            nameserver: "127.0.0.1:53".to_string(),
            workers: 32,
            lookup_timeout: Duration::from_secs(1),
        }
    }
}

impl SweepConfig {
    /// Create a new SweepConfig builder
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.prefix.is_empty() {
            return Err(SweepError::Config("prefix must be specified".to_string()));
        }
        if self.nameserver.is_empty() {
            return Err(SweepError::Config(
                "nameserver must be specified".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(SweepError::Config("workers must be at least 1".to_string()));
        }
        if self.lookup_timeout.is_zero() {
            return Err(SweepError::Config(
                "lookup_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for SweepConfig
pub struct SweepConfigBuilder {
    config: SweepConfig,
}

impl SweepConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: SweepConfig::default(),
        }
    }

    /// Set the network prefix to sweep (CIDR notation)
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the nameserver every query is sent to (`host:port`)
    pub fn nameserver(mut self, nameserver: impl Into<String>) -> Self {
        self.config.nameserver = nameserver.into();
        self
    }

    /// Set the number of concurrent resolver workers
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the per-lookup timeout
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.config.lookup_timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SweepConfig, SweepError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SweepConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
