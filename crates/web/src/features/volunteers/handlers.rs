use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{ApiResponse, ErrorResponse},
        stats::VolunteerStatsResponse,
    },
    models::{HistoryEntry, VolunteerProfile},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/volunteers/{volunteer_id}/history",
    params(
        ("volunteer_id" = i64, Path, description = "Volunteer id")
    ),
    responses(
        (status = 200, description = "Volunteer history retrieved", body = ApiResponse<Vec<HistoryEntry>>),
        (status = 400, description = "Invalid volunteer id", body = ErrorResponse)
    ),
    tag = "volunteers"
)]
pub async fn get_volunteer_history(
    State(state): State<AppState>,
    ApiPath(volunteer_id): ApiPath<i64>,
) -> Result<Response, WebError> {
    let history = services::get_volunteer_history(state.history.as_ref(), volunteer_id).await?;

    Ok(Json(ApiResponse::new(history)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/volunteers/{volunteer_id}/stats",
    params(
        ("volunteer_id" = i64, Path, description = "Volunteer id")
    ),
    responses(
        (status = 200, description = "Volunteer statistics retrieved", body = ApiResponse<VolunteerStatsResponse>),
        (status = 400, description = "Invalid volunteer id", body = ErrorResponse)
    ),
    tag = "volunteers"
)]
pub async fn get_volunteer_stats(
    State(state): State<AppState>,
    ApiPath(volunteer_id): ApiPath<i64>,
) -> Result<Response, WebError> {
    let response = services::get_volunteer_stats(
        state.history.as_ref(),
        state.volunteers.as_ref(),
        volunteer_id,
    )
    .await?;

    Ok(Json(ApiResponse::new(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/volunteers/{volunteer_id}/profile",
    params(
        ("volunteer_id" = i64, Path, description = "Volunteer id")
    ),
    responses(
        (status = 200, description = "Volunteer profile found", body = ApiResponse<VolunteerProfile>),
        (status = 404, description = "Volunteer profile not found", body = ErrorResponse)
    ),
    tag = "volunteers"
)]
pub async fn get_volunteer_profile(
    State(state): State<AppState>,
    ApiPath(volunteer_id): ApiPath<i64>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(state.volunteers.as_ref(), volunteer_id)
        .await?
        .ok_or_else(|| WebError::NotFound("Volunteer profile not found".to_string()))?;

    Ok(Json(ApiResponse::new(profile)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/volunteers/{volunteer_id}/profile",
    params(
        ("volunteer_id" = i64, Path, description = "Volunteer id")
    ),
    request_body = VolunteerProfile,
    responses(
        (status = 200, description = "Volunteer profile saved", body = ApiResponse<VolunteerProfile>),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "volunteers"
)]
pub async fn update_volunteer_profile(
    State(state): State<AppState>,
    ApiPath(volunteer_id): ApiPath<i64>,
    ApiJson(profile): ApiJson<VolunteerProfile>,
) -> Result<Response, WebError> {
    profile.validate()?;

    let saved = services::save_profile(state.volunteers.as_ref(), volunteer_id, &profile).await?;

    Ok(Json(ApiResponse::new(saved).with_message("Profile saved successfully")).into_response())
}
