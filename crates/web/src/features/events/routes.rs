use axum::{Router, routing::get};

use super::handlers::get_event_history;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:event_id/history", get(get_event_history))
}
