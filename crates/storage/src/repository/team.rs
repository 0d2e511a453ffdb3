use sqlx::SqlitePool;

use crate::dto::team::UpdateTeamRequest;
use crate::error::{Result, StorageError};
use crate::models::Team;

const TEAM_COLUMNS: &str =
    "id, name, photo_url, dance_score, song_score, ramp_walk_score, game_score";

pub struct TeamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all teams ordered by id.
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    /// Find a team by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Team> {
        sqlx::query_as::<_, Team>(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Apply a partial update: fields absent from the request fall back to
    /// the existing row.
    pub async fn update(
        &self,
        id: i64,
        existing: &Team,
        req: &UpdateTeamRequest,
    ) -> Result<Team> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let dance_score = req.dance_score.unwrap_or(existing.dance_score);
        let song_score = req.song_score.unwrap_or(existing.song_score);
        let ramp_walk_score = req.ramp_walk_score.unwrap_or(existing.ramp_walk_score);
        let game_score = req.game_score.unwrap_or(existing.game_score);

        sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET name = ?,
                dance_score = ?,
                song_score = ?,
                ramp_walk_score = ?,
                game_score = ?
            WHERE id = ?
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(dance_score)
        .bind(song_score)
        .bind(ramp_walk_score)
        .bind(game_score)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Point a team at its uploaded photo.
    pub async fn set_photo_url(&self, id: i64, photo_url: &str) -> Result<Team> {
        sqlx::query_as::<_, Team>(&format!(
            "UPDATE teams SET photo_url = ? WHERE id = ? RETURNING {TEAM_COLUMNS}"
        ))
        .bind(photo_url)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}", dir.path().join("teams.db").display());
        let db = Database::new(&url).await.expect("open database");
        db.init_schema().await.expect("create schema");
        db.seed_if_empty().await.expect("seed");
        (db, dir)
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let (db, _dir) = test_db().await;
        let repo = TeamRepository::new(db.pool());

        let existing = repo.find_by_id(1).await.unwrap();
        let request = UpdateTeamRequest {
            name: None,
            dance_score: Some(8.5),
            song_score: None,
            ramp_walk_score: None,
            game_score: None,
        };

        let updated = repo.update(1, &existing, &request).await.unwrap();
        assert_eq!(updated.dance_score, 8.5);
        assert_eq!(updated.song_score, 0.0);
        assert_eq!(updated.name, existing.name);
        assert_eq!(updated.total_score(), 8.5);
    }

    #[tokio::test]
    async fn find_by_unknown_id_is_not_found() {
        let (db, _dir) = test_db().await;
        let repo = TeamRepository::new(db.pool());

        assert!(matches!(
            repo.find_by_id(999).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn photo_url_starts_empty_and_can_be_set() {
        let (db, _dir) = test_db().await;
        let repo = TeamRepository::new(db.pool());

        assert!(repo.find_by_id(2).await.unwrap().photo_url.is_none());

        let updated = repo
            .set_photo_url(2, "/static/uploads/team_2_crew.png")
            .await
            .unwrap();
        assert_eq!(
            updated.photo_url.as_deref(),
            Some("/static/uploads/team_2_crew.png")
        );
    }
}
