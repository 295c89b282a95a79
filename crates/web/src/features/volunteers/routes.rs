use axum::{Router, routing::get};

use super::handlers::{
    get_volunteer_history, get_volunteer_profile, get_volunteer_stats, update_volunteer_profile,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:volunteer_id/history", get(get_volunteer_history))
        .route("/:volunteer_id/stats", get(get_volunteer_stats))
        .route(
            "/:volunteer_id/profile",
            get(get_volunteer_profile).put(update_volunteer_profile),
        )
}
