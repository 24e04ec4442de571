//! ptrsweep - bulk reverse DNS sweeps over CIDR ranges
//!
//! This library enumerates every address in a network prefix and resolves
//! PTR records for each one through a fixed-size worker pool, with all
//! queries pinned to a single dedicated nameserver.

pub mod dns;
pub mod range;
pub mod sweep;

// Re-export core types for library users
pub use dns::{PtrLookup, PtrLookupError, PtrResolver};
pub use range::{AddrRange, InvalidPrefixError};
pub use sweep::{
    LookupReport, SweepConfig, SweepConfigBuilder, SweepEngine, SweepError, SweepSummary,
};
