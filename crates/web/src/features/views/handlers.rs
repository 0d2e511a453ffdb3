use axum::extract::State;
use axum::response::{Html, Redirect};
use storage::models::{Performance, Team};

use crate::AppState;
use crate::error::WebError;
use crate::features::performances::services as performance_services;
use crate::features::teams::services as team_services;

pub async fn index() -> Redirect {
    Redirect::to("/leaderboard")
}

/// Admin dashboard: teams in id order with editable scores and photo upload.
pub async fn admin(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let teams = team_services::list_teams(state.db.pool()).await?;
    Ok(Html(render_admin(&teams)))
}

/// Public leaderboard: teams in descending total-score order.
pub async fn leaderboard(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let teams = team_services::list_teams_ranked(state.db.pool()).await?;
    Ok(Html(render_leaderboard(&teams)))
}

/// Performance tracker: the program in id order with completion toggles.
pub async fn performances(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let performances = performance_services::list_performances(state.db.pool()).await?;
    Ok(Html(render_performances(&performances)))
}

fn page(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; margin: 2rem; background: #fafafa; color: #222; }}
nav a {{ margin-right: 1rem; }}
table {{ border-collapse: collapse; width: 100%; background: #fff; }}
th, td {{ border: 1px solid #ddd; padding: 0.5rem 0.75rem; text-align: left; }}
th {{ background: #f0f0f0; }}
input[type=number] {{ width: 5rem; }}
img.team-photo {{ height: 3rem; }}
.completed {{ color: #2a7d2a; }}
button {{ cursor: pointer; }}
</style>
</head>
<body>
<nav>
<a href="/leaderboard">Leaderboard</a>
<a href="/admin">Admin</a>
<a href="/performances">Performances</a>
</nav>
<h1>{title}</h1>
{body}
<script>
{script}
</script>
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn photo_cell(team: &Team) -> String {
    match &team.photo_url {
        Some(url) => format!(
            r#"<img class="team-photo" src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&team.name)
        ),
        None => "&mdash;".to_string(),
    }
}

fn render_admin(teams: &[Team]) -> String {
    let mut rows = String::new();
    for team in teams {
        let score_inputs: String = [
            ("dance_score", team.dance_score),
            ("song_score", team.song_score),
            ("ramp_walk_score", team.ramp_walk_score),
            ("game_score", team.game_score),
        ]
        .iter()
        .map(|(field, value)| {
            format!(
                r#"<td><input type="number" min="0" step="0.5" class="score-input" data-field="{field}" value="{value}"></td>"#
            )
        })
        .collect();

        rows.push_str(&format!(
            r#"<tr data-team-id="{id}">
<td>{id}</td>
<td><input type="text" class="name-input" value="{name}"></td>
<td>{photo}</td>
{score_inputs}
<td class="total-score">{total}</td>
<td>
<button class="update-team-btn" data-team-id="{id}">Update</button>
<input type="file" class="photo-upload" data-team-id="{id}" accept="image/*">
</td>
</tr>
"#,
            id = team.id,
            name = escape_html(&team.name),
            photo = photo_cell(team),
            total = team.total_score(),
        ));
    }

    let body = format!(
        r#"<p><button id="finalizeBtn">Finalize Results</button> <span id="status"></span></p>
<table>
<thead>
<tr><th>Id</th><th>Name</th><th>Photo</th><th>Dance</th><th>Song</th><th>Ramp Walk</th><th>Game</th><th>Total</th><th></th></tr>
</thead>
<tbody>
{rows}
</tbody>
</table>
"#
    );

    let script = r#"
const status = document.getElementById('status');

async function updateTeam(id) {
    const row = document.querySelector(`tr[data-team-id="${id}"]`);
    const payload = { name: row.querySelector('.name-input').value };
    row.querySelectorAll('.score-input').forEach(input => {
        payload[input.dataset.field] = parseFloat(input.value) || 0;
    });
    const response = await fetch(`/api/teams/${id}`, {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
    });
    if (response.ok) {
        const team = await response.json();
        row.querySelector('.total-score').textContent = team.total_score;
        status.textContent = `Saved ${team.name}`;
    } else {
        const err = await response.json();
        status.textContent = `Error: ${err.error}`;
    }
}

async function uploadPhoto(id, file) {
    const form = new FormData();
    form.append('photo', file);
    const response = await fetch(`/api/teams/${id}/upload_photo`, { method: 'POST', body: form });
    if (response.ok) {
        location.reload();
    } else {
        const err = await response.json();
        status.textContent = `Error: ${err.error}`;
    }
}

document.addEventListener('click', (e) => {
    const btn = e.target.closest('.update-team-btn');
    if (btn) updateTeam(btn.dataset.teamId);
});

document.addEventListener('change', (e) => {
    if (e.target.classList.contains('photo-upload') && e.target.files[0]) {
        uploadPhoto(e.target.dataset.teamId, e.target.files[0]);
    }
});

document.getElementById('finalizeBtn').addEventListener('click', async () => {
    const response = await fetch('/api/finalize_results', { method: 'POST' });
    const result = await response.json();
    status.textContent = `${result.message}: top teams ${result.top_teams.join(', ')}`;
});
"#;

    page("Admin Dashboard", &body, script)
}

fn render_leaderboard(teams: &[Team]) -> String {
    let mut rows = String::new();
    for (rank, team) in teams.iter().enumerate() {
        rows.push_str(&format!(
            r#"<tr data-team-id="{id}">
<td>{rank}</td>
<td>{photo}</td>
<td>{name}</td>
<td>{dance}</td>
<td>{song}</td>
<td>{ramp_walk}</td>
<td>{game}</td>
<td><strong>{total}</strong></td>
</tr>
"#,
            rank = rank + 1,
            id = team.id,
            photo = photo_cell(team),
            name = escape_html(&team.name),
            dance = team.dance_score,
            song = team.song_score,
            ramp_walk = team.ramp_walk_score,
            game = team.game_score,
            total = team.total_score(),
        ));
    }

    let body = format!(
        r#"<table>
<thead>
<tr><th>Rank</th><th>Photo</th><th>Team</th><th>Dance</th><th>Song</th><th>Ramp Walk</th><th>Game</th><th>Total</th></tr>
</thead>
<tbody>
{rows}
</tbody>
</table>
"#
    );

    // Clients poll for fresh standings; there is no push channel.
    let script = "setTimeout(() => location.reload(), 5000);";

    page("Leaderboard", &body, script)
}

fn render_performances(performances: &[Performance]) -> String {
    let mut rows = String::new();
    for performance in performances {
        let status = if performance.is_completed {
            let when = performance
                .completed_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default();
            format!(r#"<span class="completed">Completed {when}</span>"#)
        } else {
            "Pending".to_string()
        };

        let toggle = if performance.is_completed {
            format!(
                r#"<button class="toggle-btn" data-id="{}" data-action="uncomplete">Undo</button>"#,
                performance.id
            )
        } else {
            format!(
                r#"<button class="toggle-btn" data-id="{}" data-action="complete">Complete</button>"#,
                performance.id
            )
        };

        rows.push_str(&format!(
            r#"<tr data-performance-id="{id}">
<td>{id}</td>
<td>{performer}</td>
<td>{kind}</td>
<td>{year}</td>
<td>{session}</td>
<td>{slot}</td>
<td>{status}</td>
<td>{toggle}</td>
<td>
<input type="text" class="notes-input" value="{notes}">
<button class="notes-btn" data-id="{id}">Save</button>
</td>
</tr>
"#,
            id = performance.id,
            performer = escape_html(&performance.performer_name),
            kind = escape_html(&performance.performance_type),
            year = escape_html(&performance.year),
            session = escape_html(performance.mc_session.as_deref().unwrap_or("-")),
            slot = escape_html(performance.time_slot.as_deref().unwrap_or("-")),
            notes = escape_html(performance.notes.as_deref().unwrap_or("")),
        ));
    }

    let body = format!(
        r#"<table>
<thead>
<tr><th>#</th><th>Performer</th><th>Type</th><th>Year</th><th>Session</th><th>Slot</th><th>Status</th><th></th><th>Notes</th></tr>
</thead>
<tbody>
{rows}
</tbody>
</table>
"#
    );

    let script = r#"
document.addEventListener('click', async (e) => {
    const toggle = e.target.closest('.toggle-btn');
    if (toggle) {
        await fetch(`/api/performances/${toggle.dataset.id}/${toggle.dataset.action}`, { method: 'POST' });
        location.reload();
        return;
    }
    const save = e.target.closest('.notes-btn');
    if (save) {
        const row = save.closest('tr');
        await fetch(`/api/performances/${save.dataset.id}/notes`, {
            method: 'PUT',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ notes: row.querySelector('.notes-input').value }),
        });
        location.reload();
    }
});
"#;

    page("Performance Tracker", &body, script)
}
