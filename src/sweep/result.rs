//! Report and summary types for sweep operations

use crate::dns::PtrLookupError;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Outcome of one reverse lookup, emitted by the worker that performed it
///
/// Reports are consumed by the output sink as they are produced; nothing is
/// persisted.
#[derive(Debug)]
pub struct LookupReport {
    /// Identity of the worker that ran the lookup (`0..workers`)
    pub worker_id: usize,
    /// The address that was looked up
    pub addr: IpAddr,
    /// PTR hostnames in server-returned order, or the failure
    pub result: Result<Vec<String>, PtrLookupError>,
}

impl LookupReport {
    /// First returned hostname, if the lookup succeeded.
    pub fn first_name(&self) -> Option<&str> {
        self.result
            .as_ref()
            .ok()
            .and_then(|names| names.first())
            .map(String::as_str)
    }
}

/// Aggregate counters for a completed sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Addresses fed into the work queue
    pub addresses: u64,
    /// Lookups that returned at least one PTR name
    pub resolved: u64,
    /// Lookups that failed or returned no names
    pub failed: u64,
    /// Wall-clock time for the whole sweep
    pub duration: Duration,
}

impl SweepSummary {
    /// Lookups accounted for (successes plus failures).
    pub fn completed(&self) -> u64 {
        self.resolved + self.failed
    }

    /// True once every enqueued address has a recorded outcome.
    pub fn is_complete(&self) -> bool {
        self.completed() == self.addresses
    }
}
