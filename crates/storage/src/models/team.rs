use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
    pub dance_score: f64,
    pub song_score: f64,
    pub ramp_walk_score: f64,
    pub game_score: f64,
}

impl Team {
    /// Total across all four scored rounds, recomputed on every call.
    pub fn total_score(&self) -> f64 {
        self.dance_score + self.song_score + self.ramp_walk_score + self.game_score
    }
}
