//! Aged Cache - An in-memory key-value cache with per-entry retention
//!
//! Every entry carries its own retention window. Expiration is evaluated
//! lazily on access against an injectable [`Clock`], so no background thread
//! is needed for correctness; [`spawn_reaper_task`] is available for caches
//! that sit idle.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{AgedCache, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ReaperConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_reaper_task;
