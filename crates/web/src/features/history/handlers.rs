use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{ApiResponse, ErrorResponse},
        history::{CompleteEventRequest, CreateHistoryEntryRequest, UpdateHistoryEntryRequest},
    },
    models::HistoryEntry,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::services;

/// Entry ids that are not UUIDs cannot exist, so they are reported as missing
fn parse_entry_id(id: &str) -> Result<Uuid, WebError> {
    Uuid::parse_str(id.trim()).map_err(|_| WebError::entry_not_found())
}

#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "All history entries", body = ApiResponse<Vec<HistoryEntry>>),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn list_all_history(State(state): State<AppState>) -> Result<Response, WebError> {
    let entries = services::list_all(state.history.as_ref()).await?;

    Ok(Json(ApiResponse::new(entries)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/history/{id}",
    params(
        ("id" = String, Path, description = "History entry id")
    ),
    responses(
        (status = 200, description = "History entry found", body = ApiResponse<HistoryEntry>),
        (status = 404, description = "History entry not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn get_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_entry_id(&id)?;

    let entry = services::get_entry(state.history.as_ref(), id)
        .await?
        .ok_or_else(WebError::entry_not_found)?;

    Ok(Json(ApiResponse::new(entry)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/history",
    request_body = CreateHistoryEntryRequest,
    responses(
        (status = 201, description = "History entry created successfully", body = ApiResponse<HistoryEntry>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn create_history_entry(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateHistoryEntryRequest>,
) -> Result<Response, WebError> {
    let new_entry = req.into_new_entry()?;
    new_entry.validate()?;

    let entry = services::create_entry(state.history.as_ref(), &new_entry).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(entry).with_message("History entry created successfully")),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/history/{id}",
    params(
        ("id" = String, Path, description = "History entry id")
    ),
    request_body = UpdateHistoryEntryRequest,
    responses(
        (status = 200, description = "History entry updated successfully", body = ApiResponse<HistoryEntry>),
        (status = 400, description = "Invalid field or status transition", body = ErrorResponse),
        (status = 404, description = "History entry not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn update_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UpdateHistoryEntryRequest>,
) -> Result<Response, WebError> {
    let id = parse_entry_id(&id)?;
    patch.validate()?;

    let entry = services::update_entry(state.history.as_ref(), id, &patch)
        .await?
        .ok_or_else(WebError::entry_not_found)?;

    Ok(Json(ApiResponse::new(entry).with_message("History entry updated successfully"))
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/history/{id}/complete",
    params(
        ("id" = String, Path, description = "History entry id")
    ),
    request_body = CompleteEventRequest,
    responses(
        (status = 200, description = "Event completed successfully", body = ApiResponse<HistoryEntry>),
        (status = 400, description = "Hours worked missing or entry not scheduled", body = ErrorResponse),
        (status = 404, description = "History entry not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn complete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CompleteEventRequest>,
) -> Result<Response, WebError> {
    let completion = req
        .into_completion()
        .map_err(|_| WebError::BadRequest("Hours worked is required".to_string()))?;
    completion.validate()?;

    let id = parse_entry_id(&id)?;

    let entry = services::complete_entry(state.history.as_ref(), id, &completion)
        .await?
        .ok_or_else(WebError::entry_not_found)?;

    Ok(Json(ApiResponse::new(entry).with_message("Event completed successfully")).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/history/{id}",
    params(
        ("id" = String, Path, description = "History entry id")
    ),
    responses(
        (status = 200, description = "History entry deleted successfully", body = ApiResponse<HistoryEntry>),
        (status = 404, description = "History entry not found", body = ErrorResponse)
    ),
    tag = "history"
)]
pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let id = parse_entry_id(&id)?;

    let entry = services::delete_entry(state.history.as_ref(), id)
        .await?
        .ok_or_else(WebError::entry_not_found)?;

    Ok(Json(ApiResponse::new(entry).with_message("History entry deleted successfully"))
        .into_response())
}
