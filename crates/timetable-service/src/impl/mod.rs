//! Service implementations.
//!
//! This module contains the concrete, DI-managed implementations of the
//! service traits. Trait definitions live in the parent module (e.g.
//! `group_service.rs`).

pub mod group_service_impl;
pub mod schedule_service_impl;

pub use group_service_impl::GroupServiceComponent;
pub use schedule_service_impl::{ScheduleServiceComponent, ScheduleServiceComponentParameters};
