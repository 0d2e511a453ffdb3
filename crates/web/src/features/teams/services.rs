use sqlx::SqlitePool;
use storage::{
    dto::team::UpdateTeamRequest,
    error::Result,
    models::Team,
    repository::team::TeamRepository,
    services::scoring,
};

/// List all teams ordered by id.
pub async fn list_teams(pool: &SqlitePool) -> Result<Vec<Team>> {
    let repo = TeamRepository::new(pool);
    repo.list().await
}

/// List all teams ordered by descending total score.
pub async fn list_teams_ranked(pool: &SqlitePool) -> Result<Vec<Team>> {
    let repo = TeamRepository::new(pool);
    let mut teams = repo.list().await?;
    scoring::sort_by_total_score(&mut teams);
    Ok(teams)
}

/// Get a team by id.
pub async fn find_team(pool: &SqlitePool, id: i64) -> Result<Team> {
    let repo = TeamRepository::new(pool);
    repo.find_by_id(id).await
}

/// Apply a partial update to a team.
pub async fn update_team(pool: &SqlitePool, id: i64, request: &UpdateTeamRequest) -> Result<Team> {
    let repo = TeamRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

/// Record the uploaded photo path on a team.
pub async fn set_team_photo(pool: &SqlitePool, id: i64, photo_url: &str) -> Result<Team> {
    let repo = TeamRepository::new(pool);
    repo.set_photo_url(id, photo_url).await
}

/// Ids of the top three teams by total score; read-only.
pub async fn top_three_team_ids(pool: &SqlitePool) -> Result<Vec<i64>> {
    let repo = TeamRepository::new(pool);
    let teams = repo.list().await?;
    Ok(scoring::top_team_ids(&teams, 3))
}
