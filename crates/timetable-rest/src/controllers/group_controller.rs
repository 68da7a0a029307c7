//! Student group controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use timetable_core::{ErrorResponse, GroupId};
use timetable_service::GroupDto;
use tracing::debug;

/// Creates the group router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/bulk", post(create_bulk))
        .route("/bulk-update", post(update_bulk))
        .route("/number/:group_number", get(find_by_group_number))
        .route("/:id", get(find_by_id).put(update).delete(delete))
}

/// List all groups.
#[utoipa::path(
    get,
    path = "/api/groups",
    tag = "groups",
    responses(
        (status = 200, description = "All groups with their schedules", body = Vec<GroupDto>)
    )
)]
pub async fn find_all(State(state): State<AppState>) -> ApiResult<Vec<GroupDto>> {
    debug!("List groups request");

    ok(state.group_service.find_all().await?)
}

/// Get a group by ID.
#[utoipa::path(
    get,
    path = "/api/groups/{id}",
    tag = "groups",
    params(("id" = i64, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = GroupDto),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn find_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<GroupDto> {
    debug!("Get group request: {}", id);

    ok(state.group_service.find_by_id(GroupId::new(id)).await?)
}

/// Get a group by its group number.
#[utoipa::path(
    get,
    path = "/api/groups/number/{group_number}",
    tag = "groups",
    params(("group_number" = String, Path, description = "Group number")),
    responses(
        (status = 200, description = "Group found", body = GroupDto),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn find_by_group_number(
    State(state): State<AppState>,
    Path(group_number): Path<String>,
) -> ApiResult<GroupDto> {
    debug!("Get group by number request: {}", group_number);

    ok(state.group_service.find_by_group_number(&group_number).await?)
}

/// Create a group.
#[utoipa::path(
    post,
    path = "/api/groups",
    tag = "groups",
    request_body = GroupDto,
    responses(
        (status = 200, description = "Group created", body = GroupDto),
        (status = 409, description = "Group number already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<GroupDto>,
) -> ApiResult<GroupDto> {
    debug!("Create group request: {}", dto.group_number);

    ok(state.group_service.create(dto).await?)
}

/// Update a group.
#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    tag = "groups",
    params(("id" = i64, Path, description = "Group ID")),
    request_body = GroupDto,
    responses(
        (status = 200, description = "Group updated", body = GroupDto),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<GroupDto>,
) -> ApiResult<GroupDto> {
    debug!("Update group request: {}", id);

    ok(state.group_service.update(GroupId::new(id), dto).await?)
}

/// Delete a group and its schedules.
#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    tag = "groups",
    params(("id" = i64, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete group request: {}", id);

    state.group_service.delete(GroupId::new(id)).await?;
    Ok(no_content())
}

/// Create several groups.
#[utoipa::path(
    post,
    path = "/api/groups/bulk",
    tag = "groups",
    request_body = Vec<GroupDto>,
    responses(
        (status = 201, description = "Groups created", body = Vec<GroupDto>),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<GroupDto>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<GroupDto>>>), AppError> {
    debug!("Bulk create groups request: {}", dtos.len());

    Ok(created(state.group_service.create_bulk(dtos).await?))
}

/// Update several groups.
#[utoipa::path(
    post,
    path = "/api/groups/bulk-update",
    tag = "groups",
    request_body = Vec<GroupDto>,
    responses(
        (status = 200, description = "Groups updated", body = Vec<GroupDto>),
        (status = 400, description = "Validation failed or ID missing", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn update_bulk(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<GroupDto>>,
) -> ApiResult<Vec<GroupDto>> {
    debug!("Bulk update groups request: {}", dtos.len());

    ok(state.group_service.update_bulk(dtos).await?)
}
