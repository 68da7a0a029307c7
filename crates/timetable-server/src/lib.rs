//! # Timetable Server Library
//!
//! Dependency injection wiring, logging setup and startup helpers for the
//! timetable server binary.

pub mod di;
pub mod observability;
pub mod startup;
