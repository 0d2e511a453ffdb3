use chrono::Utc;
use sqlx::SqlitePool;
use storage::{
    error::Result, models::Performance, repository::performance::PerformanceRepository,
};

/// List all performances in program order.
pub async fn list_performances(pool: &SqlitePool) -> Result<Vec<Performance>> {
    let repo = PerformanceRepository::new(pool);
    repo.list().await
}

/// Mark a performance completed, stamping `completed_at`. Returns the
/// performance and whether the call was a no-op because it was already
/// completed.
pub async fn mark_completed(pool: &SqlitePool, id: i64) -> Result<(Performance, bool)> {
    let repo = PerformanceRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    if existing.is_completed {
        return Ok((existing, true));
    }

    let updated = repo.set_completion(id, Some(Utc::now())).await?;
    Ok((updated, false))
}

/// Clear a performance's completed state. No-op when it is not completed.
pub async fn mark_uncompleted(pool: &SqlitePool, id: i64) -> Result<(Performance, bool)> {
    let repo = PerformanceRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    if !existing.is_completed {
        return Ok((existing, true));
    }

    let updated = repo.set_completion(id, None).await?;
    Ok((updated, false))
}

/// Replace a performance's notes.
pub async fn update_notes(pool: &SqlitePool, id: i64, notes: &str) -> Result<Performance> {
    let repo = PerformanceRepository::new(pool);

    repo.find_by_id(id).await?;
    repo.update_notes(id, notes).await
}
