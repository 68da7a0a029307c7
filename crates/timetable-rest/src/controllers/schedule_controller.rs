//! Schedule controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use timetable_core::{ErrorResponse, GroupId, ScheduleId};
use timetable_service::ScheduleDto;
use tracing::debug;
use utoipa::IntoParams;

/// Query of the external schedule lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExternalScheduleQuery {
    /// Group number.
    pub group: String,
    /// Date, `yyyy-MM-dd`.
    pub date: String,
}

/// Query of the stored schedule lookup by group number and date.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GroupDateQuery {
    /// Group number.
    pub group_number: String,
    /// Substring matched against the lesson time.
    pub date: String,
}

/// Creates the schedule router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/api", get(get_schedule))
        .route("/by-group-and-date", get(find_by_group_number_and_date))
        .route("/bulk", post(create_bulk))
        .route("/bulk-update", post(update_bulk))
        .route("/group/:group_id", get(find_by_group_id))
        .route("/:id", get(find_by_id).put(update).delete(delete))
}

/// List all stored schedules.
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "schedules",
    responses(
        (status = 200, description = "All schedules", body = Vec<ScheduleDto>)
    )
)]
pub async fn find_all(State(state): State<AppState>) -> ApiResult<Vec<ScheduleDto>> {
    debug!("List schedules request");

    ok(state.schedule_service.find_all().await?)
}

/// Get a schedule by ID.
#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleDto),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    )
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ScheduleDto> {
    debug!("Get schedule request: {}", id);

    ok(state.schedule_service.find_by_id(ScheduleId::new(id)).await?)
}

/// List the stored schedules of a group.
#[utoipa::path(
    get,
    path = "/api/schedules/group/{group_id}",
    tag = "schedules",
    params(("group_id" = i64, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Schedules of the group", body = Vec<ScheduleDto>)
    )
)]
pub async fn find_by_group_id(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<Vec<ScheduleDto>> {
    debug!("List schedules of group request: {}", group_id);

    ok(state.schedule_service.find_by_group_id(GroupId::new(group_id)).await?)
}

/// Fetch the lessons of a group on a date from the university API.
#[utoipa::path(
    get,
    path = "/api/schedules/api",
    tag = "schedules",
    params(ExternalScheduleQuery),
    responses(
        (status = 200, description = "Lessons on the date", body = Vec<ScheduleDto>),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 502, description = "University API unavailable", body = ErrorResponse)
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ExternalScheduleQuery>,
) -> ApiResult<Vec<ScheduleDto>> {
    debug!("External schedule request: {} on {}", query.group, query.date);

    ok(state.schedule_service.get_schedule(&query.group, &query.date).await?)
}

/// List stored schedules of a group whose time contains a date.
#[utoipa::path(
    get,
    path = "/api/schedules/by-group-and-date",
    tag = "schedules",
    params(GroupDateQuery),
    responses(
        (status = 200, description = "Matching schedules", body = Vec<ScheduleDto>)
    )
)]
pub async fn find_by_group_number_and_date(
    State(state): State<AppState>,
    Query(query): Query<GroupDateQuery>,
) -> ApiResult<Vec<ScheduleDto>> {
    debug!(
        "Schedules by group and date request: {} on {}",
        query.group_number, query.date
    );

    ok(state
        .schedule_service
        .find_by_group_number_and_date(&query.group_number, &query.date)
        .await?)
}

/// Create a schedule.
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "schedules",
    request_body = ScheduleDto,
    responses(
        (status = 200, description = "Schedule created", body = ScheduleDto),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ScheduleDto>,
) -> ApiResult<ScheduleDto> {
    debug!("Create schedule request: {}", dto.subject);

    ok(state.schedule_service.create(dto).await?)
}

/// Update a schedule.
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    request_body = ScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleDto),
        (status = 404, description = "Schedule or group not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ScheduleDto>,
) -> ApiResult<ScheduleDto> {
    debug!("Update schedule request: {}", id);

    ok(state.schedule_service.update(ScheduleId::new(id), dto).await?)
}

/// Delete a schedule.
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete schedule request: {}", id);

    state.schedule_service.delete(ScheduleId::new(id)).await?;
    Ok(no_content())
}

/// Create several schedules.
#[utoipa::path(
    post,
    path = "/api/schedules/bulk",
    tag = "schedules",
    request_body = Vec<ScheduleDto>,
    responses(
        (status = 201, description = "Schedules created", body = Vec<ScheduleDto>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<ScheduleDto>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ScheduleDto>>>), AppError> {
    debug!("Bulk create schedules request: {}", dtos.len());

    Ok(created(state.schedule_service.create_bulk(dtos).await?))
}

/// Update several schedules.
#[utoipa::path(
    post,
    path = "/api/schedules/bulk-update",
    tag = "schedules",
    request_body = Vec<ScheduleDto>,
    responses(
        (status = 200, description = "Schedules updated", body = Vec<ScheduleDto>),
        (status = 400, description = "Validation failed or ID missing", body = ErrorResponse),
        (status = 404, description = "Schedule or group not found", body = ErrorResponse)
    )
)]
pub async fn update_bulk(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<ScheduleDto>>,
) -> ApiResult<Vec<ScheduleDto>> {
    debug!("Bulk update schedules request: {}", dtos.len());

    ok(state.schedule_service.update_bulk(dtos).await?)
}
