//! Application state for Axum handlers.

use shaku::{HasComponent, Module};
use std::sync::Arc;
use timetable_core::HealthCheck;
use timetable_service::{GroupService, RequestCounterInterface, ScheduleService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<dyn GroupService>,
    pub schedule_service: Arc<dyn ScheduleService>,
    pub request_counter: Arc<dyn RequestCounterInterface>,
    /// Checks run by the readiness probe.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        group_service: Arc<dyn GroupService>,
        schedule_service: Arc<dyn ScheduleService>,
        request_counter: Arc<dyn RequestCounterInterface>,
    ) -> Self {
        Self {
            group_service,
            schedule_service,
            request_counter,
            health_checks: Vec::new(),
        }
    }

    /// Resolves the services and the request counter from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn GroupService>
            + HasComponent<dyn ScheduleService>
            + HasComponent<dyn RequestCounterInterface>,
    {
        Self::new(module.resolve(), module.resolve(), module.resolve())
    }

    /// Adds a dependency check to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
