//! DNS functionality for reverse lookups

pub mod reverse;

pub use reverse::{PtrLookup, PtrLookupError, PtrResolver};
