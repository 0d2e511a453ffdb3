use axum::{
    Router,
    routing::{get, post, put},
};

use crate::AppState;

use super::handlers::{finalize_results, list_teams, update_team, upload_team_photo};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams))
        .route("/:id", put(update_team))
        .route("/:id/upload_photo", post(upload_team_photo))
}

/// Finalize lives outside the `/api/teams` nest in the public surface.
pub fn finalize_routes() -> Router<AppState> {
    Router::new().route("/api/finalize_results", post(finalize_results))
}
