use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::Performance;

const PERFORMANCE_COLUMNS: &str = "id, performer_name, performance_type, year, contact_number, \
     mc_session, time_slot, is_completed, completed_at, notes";

pub struct PerformanceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PerformanceRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all performances in program (id) order.
    pub async fn list(&self) -> Result<Vec<Performance>> {
        let performances = sqlx::query_as::<_, Performance>(&format!(
            "SELECT {PERFORMANCE_COLUMNS} FROM performances ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(performances)
    }

    /// Find a performance by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Performance> {
        sqlx::query_as::<_, Performance>(&format!(
            "SELECT {PERFORMANCE_COLUMNS} FROM performances WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Set both completion fields in one statement so `completed_at` can
    /// never disagree with `is_completed`.
    pub async fn set_completion(
        &self,
        id: i64,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Performance> {
        sqlx::query_as::<_, Performance>(&format!(
            r#"
            UPDATE performances
            SET is_completed = ?,
                completed_at = ?
            WHERE id = ?
            RETURNING {PERFORMANCE_COLUMNS}
            "#
        ))
        .bind(completed_at.is_some())
        .bind(completed_at)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Replace the free-text notes.
    pub async fn update_notes(&self, id: i64, notes: &str) -> Result<Performance> {
        sqlx::query_as::<_, Performance>(&format!(
            "UPDATE performances SET notes = ? WHERE id = ? RETURNING {PERFORMANCE_COLUMNS}"
        ))
        .bind(notes)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
