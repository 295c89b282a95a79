use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    complete_event, create_history_entry, delete_history_entry, get_history_entry,
    list_all_history, update_history_entry,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_history).post(create_history_entry))
        .route(
            "/:id",
            get(get_history_entry)
                .put(update_history_entry)
                .delete(delete_history_entry),
        )
        .route("/:id/complete", post(complete_event))
}
