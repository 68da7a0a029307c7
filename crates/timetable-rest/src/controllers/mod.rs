//! REST API controllers.

pub mod counter_controller;
pub mod group_controller;
pub mod health_controller;
pub mod schedule_controller;

pub use health_controller::*;
