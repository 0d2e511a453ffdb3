use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use storage::dto::performance::{
    CompletionNoopResponse, PerformanceResponse, UpdateNotesRequest,
};

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/performances",
    responses(
        (status = 200, description = "All performances in program order", body = Vec<PerformanceResponse>)
    ),
    tag = "performances"
)]
pub async fn list_performances(
    State(state): State<AppState>,
) -> Result<Json<Vec<PerformanceResponse>>, WebError> {
    let performances = services::list_performances(state.db.pool()).await?;

    let response: Vec<PerformanceResponse> = performances
        .into_iter()
        .map(PerformanceResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/performances/{id}/complete",
    params(
        ("id" = i64, Path, description = "Performance id")
    ),
    responses(
        (status = 200, description = "Performance marked completed, or an already-completed notice", body = PerformanceResponse),
        (status = 404, description = "Performance not found")
    ),
    tag = "performances"
)]
pub async fn complete_performance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let (performance, already) = services::mark_completed(state.db.pool(), id).await?;
    let response = PerformanceResponse::from(performance);

    if already {
        return Ok(Json(CompletionNoopResponse {
            message: "Performance already marked as completed".to_string(),
            performance: response,
        })
        .into_response());
    }

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/performances/{id}/uncomplete",
    params(
        ("id" = i64, Path, description = "Performance id")
    ),
    responses(
        (status = 200, description = "Performance marked not completed, or a not-completed notice", body = PerformanceResponse),
        (status = 404, description = "Performance not found")
    ),
    tag = "performances"
)]
pub async fn uncomplete_performance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let (performance, already) = services::mark_uncompleted(state.db.pool(), id).await?;
    let response = PerformanceResponse::from(performance);

    if already {
        return Ok(Json(CompletionNoopResponse {
            message: "Performance is not marked as completed".to_string(),
            performance: response,
        })
        .into_response());
    }

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/performances/{id}/notes",
    params(
        ("id" = i64, Path, description = "Performance id")
    ),
    request_body = UpdateNotesRequest,
    responses(
        (status = 200, description = "Notes updated", body = PerformanceResponse),
        (status = 400, description = "Missing notes field"),
        (status = 404, description = "Performance not found")
    ),
    tag = "performances"
)]
pub async fn update_performance_notes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<PerformanceResponse>, WebError> {
    let request: UpdateNotesRequest = serde_json::from_value(payload)
        .map_err(|_| WebError::BadRequest("Missing required field: notes".into()))?;

    let performance = services::update_notes(state.db.pool(), id, &request.notes).await?;

    Ok(Json(PerformanceResponse::from(performance)))
}
