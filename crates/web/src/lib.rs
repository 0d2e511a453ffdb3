use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use storage::Database;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;

use config::Config;

/// Shared application context, constructed once at startup and handed to
/// every request handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::teams::handlers::list_teams,
        features::teams::handlers::update_team,
        features::teams::handlers::upload_team_photo,
        features::teams::handlers::finalize_results,
        features::performances::handlers::list_performances,
        features::performances::handlers::complete_performance,
        features::performances::handlers::uncomplete_performance,
        features::performances::handlers::update_performance_notes,
    ),
    components(
        schemas(
            storage::dto::team::TeamResponse,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::PhotoUploadResponse,
            storage::dto::team::FinalizeResultsResponse,
            storage::dto::performance::PerformanceResponse,
            storage::dto::performance::UpdateNotesRequest,
            storage::dto::performance::CompletionNoopResponse,
            storage::models::Team,
            storage::models::Performance,
        )
    ),
    tags(
        (name = "teams", description = "Team score and photo endpoints"),
        (name = "performances", description = "Performance tracking endpoints"),
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();
    let upload_dir = state.config.upload_dir.clone();
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .merge(features::views::routes::routes())
        .nest("/api/teams", features::teams::routes::routes())
        .merge(features::teams::routes::finalize_routes())
        .nest("/api/performances", features::performances::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .nest_service("/static/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
