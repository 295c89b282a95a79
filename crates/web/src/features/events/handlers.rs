use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{ApiResponse, ErrorResponse},
    history::EnrichedHistoryEntry,
};

use crate::error::WebError;
use crate::extract::ApiPath;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/history",
    params(
        ("event_id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event history retrieved", body = ApiResponse<Vec<EnrichedHistoryEntry>>),
        (status = 400, description = "Invalid event id", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event_history(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> Result<Response, WebError> {
    let history = services::get_event_history(
        state.history.as_ref(),
        state.volunteers.as_ref(),
        event_id,
    )
    .await?;

    Ok(Json(ApiResponse::new(history)).into_response())
}
