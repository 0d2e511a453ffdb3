use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A scheduled act in the event program. `completed_at` is set exactly when
/// the act transitions to completed and cleared when the transition is
/// reversed, so it is non-null iff `is_completed`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Performance {
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
