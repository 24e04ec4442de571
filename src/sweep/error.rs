//! Error types for sweep operations

use thiserror::Error;

/// Errors that can occur while setting up or running a sweep
///
/// All of these are fatal: they abort the sweep before (or, for [`Pool`],
/// while) any further work is done. Individual lookup failures are not errors
/// at this level; workers report and skip them.
///
/// [`Pool`]: SweepError::Pool
#[derive(Debug, Error)]
pub enum SweepError {
    /// The configured network prefix could not be parsed
    #[error("invalid network prefix: {0}")]
    InvalidPrefix(String),

    /// The configured nameserver could not be resolved to a socket address
    #[error("invalid nameserver address: {0}")]
    InvalidNameserver(String),

    /// Invalid configuration provided
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The worker pool shut down before the range was drained
    #[error("worker pool failed: {0}")]
    Pool(String),
}
