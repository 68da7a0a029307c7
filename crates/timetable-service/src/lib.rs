//! # Timetable Service
//!
//! Business logic for student groups and schedules: read-through caching,
//! request counting and ingestion of the external schedule feed.

pub mod cache;
pub mod counter;
pub mod dto;
pub mod external;
pub mod group_service;
pub mod r#impl;
pub mod schedule_service;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::*;
pub use counter::*;
pub use dto::*;
pub use external::*;
pub use group_service::*;
pub use r#impl::*;
pub use schedule_service::*;
