use axum::Router;

use crate::features::{events, history, ranking, volunteers};
use crate::state::AppState;

/// Builds the `/api` router over the given stores
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/history", history::routes())
        .nest("/volunteers", volunteers::routes())
        .nest("/events", events::routes())
        .nest("/top-volunteers", ranking::routes());

    Router::new().nest("/api", api).with_state(state)
}
