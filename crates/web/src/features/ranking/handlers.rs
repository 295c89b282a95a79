use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{ApiResponse, ErrorResponse},
    stats::{RankedVolunteer, TopVolunteersQuery},
};

use crate::error::WebError;
use crate::extract::ApiQuery;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/top-volunteers",
    params(TopVolunteersQuery),
    responses(
        (status = 200, description = "Volunteer ranking retrieved successfully", body = ApiResponse<Vec<RankedVolunteer>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "rankings"
)]
pub async fn get_top_volunteers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopVolunteersQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let ranking = services::get_top_volunteers(
        state.history.as_ref(),
        state.volunteers.as_ref(),
        query.limit(),
    )
    .await?;

    Ok(Json(ApiResponse::new(ranking)).into_response())
}
