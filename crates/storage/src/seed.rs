use tracing::info;

use crate::db::Database;
use crate::error::Result;

pub const DEFAULT_TEAMS: [&str; 11] = [
    "Team Alpha",
    "Team Beta",
    "Team Gamma",
    "Team Delta",
    "Team Epsilon",
    "Team Zeta",
    "Team Eta",
    "Team Theta",
    "Team Iota",
    "Team Kappa",
    "Team Lambda",
];

/// Fixed event program: performer, type, year, contact, MC session, slot.
pub const DEFAULT_SCHEDULE: [(
    &str,
    &str,
    &str,
    Option<&str>,
    Option<&str>,
    Option<&str>,
); 8] = [
    (
        "Priya Sharma",
        "Group Dance",
        "I",
        Some("98450 12345"),
        Some("Session 1"),
        Some("10:00 AM"),
    ),
    (
        "Rahul Verma",
        "Song",
        "II",
        Some("99860 23456"),
        Some("Session 1"),
        Some("10:20 AM"),
    ),
    (
        "Ananya Iyer",
        "Solo Dance",
        "III",
        None,
        Some("Session 1"),
        Some("10:40 AM"),
    ),
    (
        "Campus Band",
        "Band",
        "Band",
        Some("97410 34567"),
        Some("Session 1"),
        Some("11:00 AM"),
    ),
    (
        "Sneha Patil",
        "Song",
        "I",
        None,
        Some("Session 2"),
        Some("2:00 PM"),
    ),
    (
        "Arjun Menon",
        "Stand-up",
        "II",
        Some("96320 45678"),
        Some("Session 2"),
        Some("2:20 PM"),
    ),
    (
        "Divya Nair",
        "Group Dance",
        "III",
        None,
        Some("Session 2"),
        Some("2:40 PM"),
    ),
    (
        "Karan Gupta",
        "Ramp Walk",
        "II",
        Some("95510 56789"),
        Some("Session 2"),
        Some("3:00 PM"),
    ),
];

impl Database {
    /// Insert the default rows for any collection that is still empty.
    /// Gated on a count check per table, so repeated startups never
    /// duplicate rows.
    pub async fn seed_if_empty(&self) -> Result<()> {
        let team_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(self.pool())
            .await?;

        if team_count == 0 {
            for name in DEFAULT_TEAMS {
                sqlx::query(
                    r#"
                    INSERT INTO teams (name, photo_url, dance_score, song_score, ramp_walk_score, game_score)
                    VALUES (?, NULL, 0, 0, 0, 0)
                    "#,
                )
                .bind(name)
                .execute(self.pool())
                .await?;
            }
            info!("Created {} default teams", DEFAULT_TEAMS.len());
        }

        let performance_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM performances")
            .fetch_one(self.pool())
            .await?;

        if performance_count == 0 {
            for (performer_name, performance_type, year, contact_number, mc_session, time_slot) in
                DEFAULT_SCHEDULE
            {
                sqlx::query(
                    r#"
                    INSERT INTO performances
                        (performer_name, performance_type, year, contact_number, mc_session, time_slot, is_completed)
                    VALUES (?, ?, ?, ?, ?, ?, 0)
                    "#,
                )
                .bind(performer_name)
                .bind(performance_type)
                .bind(year)
                .bind(contact_number)
                .bind(mc_session)
                .bind(time_slot)
                .execute(self.pool())
                .await?;
            }
            info!(
                "Created {} scheduled performances",
                DEFAULT_SCHEDULE.len()
            );
        }

        Ok(())
    }
}
