//! Ranking over team totals. Every call site that orders teams by score
//! (JSON API, leaderboard view, finalize) goes through this module, so a
//! weighting change only ever touches one place.

use std::cmp::Ordering;

use crate::models::Team;

/// Sort teams by total score, highest first. The sort is stable, so tied
/// teams keep their id order.
pub fn sort_by_total_score(teams: &mut [Team]) {
    teams.sort_by(|a, b| {
        b.total_score()
            .partial_cmp(&a.total_score())
            .unwrap_or(Ordering::Equal)
    });
}

/// Ids of the `limit` highest-scoring teams, best first.
pub fn top_team_ids(teams: &[Team], limit: usize) -> Vec<i64> {
    let mut ranked = teams.to_vec();
    sort_by_total_score(&mut ranked);
    ranked.iter().take(limit).map(|team| team.id).collect()
}
