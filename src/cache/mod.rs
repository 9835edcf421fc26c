//! Cache Module
//!
//! Provides the in-memory cache with per-entry retention and lazy expiration.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use stats::CacheStats;
pub use store::{AgedCache, Iter};
