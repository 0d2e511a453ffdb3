use axum::{Router, routing::get};

use crate::AppState;

use super::handlers::{admin, index, leaderboard, performances};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/admin", get(admin))
        .route("/leaderboard", get(leaderboard))
        .route("/performances", get(performances))
}
