use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Team;

/// Wire representation of a team, including the derived total.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
    pub dance_score: f64,
    pub song_score: f64,
    pub ramp_walk_score: f64,
    pub game_score: f64,
    pub total_score: f64,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        let total_score = team.total_score();
        Self {
            id: team.id,
            name: team.name,
            photo_url: team.photo_url,
            dance_score: team.dance_score,
            song_score: team.song_score,
            ramp_walk_score: team.ramp_walk_score,
            game_score: team.game_score,
            total_score,
        }
    }
}

/// Partial update: fields absent from the payload are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must not be empty"))]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "Score must be non-negative"))]
    pub dance_score: Option<f64>,

    #[validate(range(min = 0.0, message = "Score must be non-negative"))]
    pub song_score: Option<f64>,

    #[validate(range(min = 0.0, message = "Score must be non-negative"))]
    pub ramp_walk_score: Option<f64>,

    #[validate(range(min = 0.0, message = "Score must be non-negative"))]
    pub game_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoUploadResponse {
    pub message: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinalizeResultsResponse {
    pub message: String,
    pub top_teams: Vec<i64>,
}
