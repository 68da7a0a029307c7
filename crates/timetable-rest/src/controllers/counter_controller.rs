//! Request counter controller. These endpoints are not counted.

use crate::{
    responses::{no_content, ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::info;

/// Creates the counter router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_count))
        .route("/reset", post(reset))
}

/// Number of service calls since start or the last reset.
#[utoipa::path(
    get,
    path = "/api/counter",
    tag = "counter",
    responses(
        (status = 200, description = "Current request count", body = u64)
    )
)]
pub async fn get_count(State(state): State<AppState>) -> ApiResult<u64> {
    ok(state.request_counter.count())
}

/// Reset the counter to zero.
#[utoipa::path(
    post,
    path = "/api/counter/reset",
    tag = "counter",
    responses(
        (status = 204, description = "Counter reset")
    )
)]
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.request_counter.reset();
    info!("Request counter reset");
    no_content()
}
