use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Performance;

/// Wire representation of a scheduled performance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceResponse {
    pub id: i64,
    pub performer_name: String,
    pub performance_type: String,
    pub year: String,
    pub contact_number: Option<String>,
    pub mc_session: Option<String>,
    pub time_slot: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<Performance> for PerformanceResponse {
    fn from(performance: Performance) -> Self {
        Self {
            id: performance.id,
            performer_name: performance.performer_name,
            performance_type: performance.performance_type,
            year: performance.year,
            contact_number: performance.contact_number,
            mc_session: performance.mc_session,
            time_slot: performance.time_slot,
            is_completed: performance.is_completed,
            completed_at: performance.completed_at,
            notes: performance.notes,
        }
    }
}

/// Body of `PUT /api/performances/{id}/notes`; the field is required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNotesRequest {
    pub notes: String,
}

/// Returned when a completion toggle was a no-op because the performance
/// was already in the requested state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletionNoopResponse {
    pub message: String,
    pub performance: PerformanceResponse,
}
