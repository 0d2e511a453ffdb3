use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State},
};
use serde_json::Value;
use storage::dto::team::{
    FinalizeResultsResponse, PhotoUploadResponse, TeamResponse, UpdateTeamRequest,
};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "All teams sorted by descending total score", body = Vec<TeamResponse>)
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, WebError> {
    let teams = services::list_teams_ranked(state.db.pool()).await?;

    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(
        ("id" = i64, Path, description = "Team id")
    ),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<TeamResponse>, WebError> {
    // Explicit parse step: a mistyped field (e.g. a non-numeric score) is a
    // 400, not an uncaught coercion failure.
    let request: UpdateTeamRequest = serde_json::from_value(payload)
        .map_err(|e| WebError::BadRequest(format!("Invalid team payload: {e}")))?;
    request.validate()?;

    let team = services::update_team(state.db.pool(), id, &request).await?;

    Ok(Json(TeamResponse::from(team)))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/upload_photo",
    params(
        ("id" = i64, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Photo stored", body = PhotoUploadResponse),
        (status = 400, description = "Missing file or disallowed extension"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn upload_team_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, WebError> {
    let team = services::find_team(state.db.pool(), id).await?;

    let mut photo: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("photo") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(format!("Failed to read uploaded file: {e}")))?;
            photo = Some((filename, data));
            break;
        }
    }

    let (filename, data) = photo.ok_or_else(|| WebError::BadRequest("No file provided".into()))?;
    if filename.is_empty() {
        return Err(WebError::BadRequest("No file selected".into()));
    }
    if !allowed_file(&filename) {
        return Err(WebError::BadRequest("Invalid file type".into()));
    }

    let stored_name = secure_filename(&format!("team_{id}_{filename}"));
    let upload_dir = std::path::Path::new(&state.config.upload_dir);

    // Remove the previous photo, ignoring the case where it is already gone.
    if let Some(old_url) = &team.photo_url
        && let Some(old_name) = old_url.rsplit('/').next()
    {
        let old_path = upload_dir.join(old_name);
        match tokio::fs::remove_file(&old_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Failed to remove old photo {}: {e}", old_path.display());
            }
        }
    }

    tokio::fs::write(upload_dir.join(&stored_name), &data)
        .await
        .map_err(|e| WebError::InternalServerError(format!("Failed to store photo: {e}")))?;

    let photo_url = format!("/static/uploads/{stored_name}");
    services::set_team_photo(state.db.pool(), id, &photo_url).await?;

    Ok(Json(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url,
    }))
}

#[utoipa::path(
    post,
    path = "/api/finalize_results",
    responses(
        (status = 200, description = "Top three team ids in score order", body = FinalizeResultsResponse)
    ),
    tag = "teams"
)]
pub async fn finalize_results(
    State(state): State<AppState>,
) -> Result<Json<FinalizeResultsResponse>, WebError> {
    let top_teams = services::top_three_team_ids(state.db.pool()).await?;

    Ok(Json(FinalizeResultsResponse {
        message: "Results finalized".to_string(),
        top_teams,
    }))
}

fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Keep only filesystem-safe characters; everything else becomes '_'.
fn secure_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
