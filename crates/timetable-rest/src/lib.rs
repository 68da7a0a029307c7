//! # Timetable REST
//!
//! REST API layer using Axum for the timetable service.
//! Provides HTTP endpoints for groups, schedules, the request counter and
//! health checks, plus the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
