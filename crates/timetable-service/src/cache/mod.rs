//! In-memory caching for the service layer.
//!
//! [`CacheManager`] holds four [`BoundedCache`] maps: groups by id, group
//! lists by key, schedules by id and schedule lists by key. Services read
//! through them and clear them on every mutation.

mod bounded;
mod cache_manager;
pub mod cache_keys;

pub use bounded::{BoundedCache, DEFAULT_CAPACITY};
pub use cache_manager::{CacheManager, CacheManagerInterface, CacheManagerParameters};
