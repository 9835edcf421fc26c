//! Background Tasks Module
//!
//! Contains background tasks that can run alongside a shared cache.
//!
//! # Tasks
//! - Expiration reaper: purges expired entries at a configured interval

mod reaper;

pub use reaper::spawn_reaper_task;
