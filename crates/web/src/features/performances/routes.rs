use axum::{
    Router,
    routing::{get, post, put},
};

use crate::AppState;

use super::handlers::{
    complete_performance, list_performances, uncomplete_performance, update_performance_notes,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_performances))
        .route("/:id/complete", post(complete_performance))
        .route("/:id/uncomplete", post(uncomplete_performance))
        .route("/:id/notes", put(update_performance_notes))
}
