use axum::{Router, routing::get};

use super::handlers::get_top_volunteers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_top_volunteers))
}
