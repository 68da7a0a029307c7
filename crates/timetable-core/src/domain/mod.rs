//! Domain entities for the timetable service.
//!
//! A [`Group`] is a student cohort identified by a unique group number and
//! owns its [`Schedule`] entries. Deleting a group removes its schedules.

pub mod entities;

pub use entities::*;
