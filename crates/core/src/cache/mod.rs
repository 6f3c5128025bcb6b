//! In-memory TTL cache for converted page content.
//!
//! Entries expire a fixed time after they are written. Expiry is checked on
//! every read, so a stale value is never returned; a background sweep
//! periodically drops expired entries to reclaim memory.
//!
//! - One `RwLock` guards the map: reads share it, writes and sweeps take it exclusively
//! - The sweep is a cancellable tokio task; `destroy` waits for it to stop
//! - Eviction is time-only (no size limit, no LRU)

mod store;
mod sweep;

pub use store::{CacheStats, TtlCache};
