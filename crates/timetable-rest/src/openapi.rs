//! OpenAPI documentation configuration.

use crate::controllers::{ComponentHealth, HealthResponse, ReadinessResponse};
use timetable_core::{ErrorResponse, FieldError, GroupId, ScheduleId};
use timetable_service::{GroupDto, ScheduleDto};
use utoipa::OpenApi;

/// OpenAPI documentation for the timetable API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timetable API",
        version = "1.0.0",
        description = "Student groups, stored lessons and the BSUIR schedule lookup"
    ),
    paths(
        crate::controllers::group_controller::find_all,
        crate::controllers::group_controller::find_by_id,
        crate::controllers::group_controller::find_by_group_number,
        crate::controllers::group_controller::create,
        crate::controllers::group_controller::update,
        crate::controllers::group_controller::delete,
        crate::controllers::group_controller::create_bulk,
        crate::controllers::group_controller::update_bulk,
        crate::controllers::schedule_controller::find_all,
        crate::controllers::schedule_controller::find_by_id,
        crate::controllers::schedule_controller::find_by_group_id,
        crate::controllers::schedule_controller::get_schedule,
        crate::controllers::schedule_controller::find_by_group_number_and_date,
        crate::controllers::schedule_controller::create,
        crate::controllers::schedule_controller::update,
        crate::controllers::schedule_controller::delete,
        crate::controllers::schedule_controller::create_bulk,
        crate::controllers::schedule_controller::update_bulk,
        crate::controllers::counter_controller::get_count,
        crate::controllers::counter_controller::reset,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            GroupId,
            ScheduleId,
            ErrorResponse,
            FieldError,
            GroupDto,
            ScheduleDto,
            HealthResponse,
            ComponentHealth,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "groups", description = "Student group management"),
        (name = "schedules", description = "Stored lessons and the external schedule lookup"),
        (name = "counter", description = "Service call counter"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
