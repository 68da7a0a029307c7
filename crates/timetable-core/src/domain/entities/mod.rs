//! Domain entities.

mod group;
mod schedule;

pub use group::{Group, NewGroup};
pub use schedule::{NewSchedule, Schedule};
