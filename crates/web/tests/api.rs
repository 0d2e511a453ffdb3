use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};
use storage::Database;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use web::config::Config;
use web::{AppState, build_router};

struct TestServer {
    addr: SocketAddr,
    upload_dir: std::path::PathBuf,
    _dir: TempDir,
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let upload_dir = dir.path().join("uploads");
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("create upload dir");

    let database_url = format!("sqlite://{}", dir.path().join("scores.db").display());
    let db = Database::new(&database_url).await.expect("open database");
    db.init_schema().await.expect("create schema");
    db.seed_if_empty().await.expect("seed defaults");

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url,
        session_secret: "test-secret".to_string(),
        upload_dir: upload_dir.display().to_string(),
        max_upload_bytes: 16 * 1024 * 1024,
    };

    let app = build_router(AppState {
        db,
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestServer {
        addr,
        upload_dir,
        _dir: dir,
    }
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");

    let mut request = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(content_type) = content_type {
        request.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    request.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));

    let mut bytes = request.into_bytes();
    bytes.extend_from_slice(body);
    stream.write_all(&bytes).await.expect("write request");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    let response = String::from_utf8_lossy(&response).to_string();

    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");

    (status, head.to_string(), body.to_string())
}

async fn get(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_raw(addr, "GET", path, None, b"").await
}

async fn send_json(addr: SocketAddr, method: &str, path: &str, body: Value) -> (u16, String) {
    let body = body.to_string();
    let (status, _, response) = send_raw(
        addr,
        method,
        path,
        Some("application/json"),
        body.as_bytes(),
    )
    .await;
    (status, response)
}

async fn fetch_team(addr: SocketAddr, id: i64) -> Value {
    let (status, _, body) = get(addr, "/api/teams").await;
    assert_eq!(status, 200);
    let teams: Vec<Value> = serde_json::from_str(&body).expect("teams json");
    teams
        .into_iter()
        .find(|t| t["id"] == json!(id))
        .expect("team present")
}

const BOUNDARY: &str = "scoreboardtestboundary";

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload_photo(
    addr: SocketAddr,
    team_id: i64,
    field: &str,
    filename: &str,
    content: &[u8],
) -> (u16, String) {
    let body = multipart_body(field, filename, content);
    let (status, _, response) = send_raw(
        addr,
        "POST",
        &format!("/api/teams/{team_id}/upload_photo"),
        Some(&format!("multipart/form-data; boundary={BOUNDARY}")),
        &body,
    )
    .await;
    (status, response)
}

#[tokio::test]
async fn seeded_teams_start_with_zero_totals() {
    let server = spawn_server().await;

    let (status, _, body) = get(server.addr, "/api/teams").await;
    assert_eq!(status, 200);

    let teams: Vec<Value> = serde_json::from_str(&body).expect("teams json");
    assert_eq!(teams.len(), 11);
    assert!(teams.iter().any(|t| t["name"] == "Team Alpha"));
    assert!(teams.iter().all(|t| t["total_score"] == json!(0.0)));
    assert!(teams.iter().all(|t| t["photo_url"].is_null()));
}

#[tokio::test]
async fn partial_update_changes_only_provided_fields() {
    let server = spawn_server().await;

    let (status, body) = send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"dance_score": 8.5}),
    )
    .await;
    assert_eq!(status, 200);
    let updated: Value = serde_json::from_str(&body).expect("team json");
    assert_eq!(updated["dance_score"], json!(8.5));
    assert_eq!(updated["total_score"], json!(8.5));

    let team = fetch_team(server.addr, 1).await;
    assert_eq!(team["dance_score"], json!(8.5));
    assert_eq!(team["song_score"], json!(0.0));
    assert_eq!(team["name"], "Team Alpha");

    // Renaming leaves scores alone.
    let (status, _) = send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"name": "Team Omega"}),
    )
    .await;
    assert_eq!(status, 200);
    let team = fetch_team(server.addr, 1).await;
    assert_eq!(team["name"], "Team Omega");
    assert_eq!(team["dance_score"], json!(8.5));
}

#[tokio::test]
async fn non_numeric_score_is_a_bad_request() {
    let server = spawn_server().await;

    let (status, body) = send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"dance_score": "nine"}),
    )
    .await;
    assert_eq!(status, 400);
    let error: Value = serde_json::from_str(&body).expect("error json");
    assert!(error["error"].is_string());

    let team = fetch_team(server.addr, 1).await;
    assert_eq!(team["dance_score"], json!(0.0));
}

#[tokio::test]
async fn negative_score_is_a_bad_request() {
    let server = spawn_server().await;

    let (status, _) = send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"game_score": -2.0}),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn unknown_team_is_not_found() {
    let server = spawn_server().await;

    let (status, body) = send_json(
        server.addr,
        "PUT",
        "/api/teams/999",
        json!({"dance_score": 1.0}),
    )
    .await;
    assert_eq!(status, 404);
    let error: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(error["error"], "Resource not found");

    let (status, _) = upload_photo(server.addr, 999, "photo", "crew.png", b"fake png").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn teams_api_is_sorted_by_descending_total() {
    let server = spawn_server().await;

    send_json(
        server.addr,
        "PUT",
        "/api/teams/2",
        json!({"dance_score": 9.0, "song_score": 8.0}),
    )
    .await;
    send_json(
        server.addr,
        "PUT",
        "/api/teams/5",
        json!({"game_score": 30.0}),
    )
    .await;
    send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"ramp_walk_score": 4.0}),
    )
    .await;

    let (status, _, body) = get(server.addr, "/api/teams").await;
    assert_eq!(status, 200);
    let teams: Vec<Value> = serde_json::from_str(&body).expect("teams json");

    assert_eq!(teams[0]["id"], json!(5));
    assert_eq!(teams[1]["id"], json!(2));
    assert_eq!(teams[2]["id"], json!(1));

    let totals: Vec<f64> = teams
        .iter()
        .map(|t| t["total_score"].as_f64().unwrap())
        .collect();
    assert!(totals.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn finalize_returns_top_three_in_score_order() {
    let server = spawn_server().await;

    send_json(
        server.addr,
        "PUT",
        "/api/teams/3",
        json!({"dance_score": 50.0}),
    )
    .await;
    send_json(
        server.addr,
        "PUT",
        "/api/teams/7",
        json!({"song_score": 40.0}),
    )
    .await;
    send_json(
        server.addr,
        "PUT",
        "/api/teams/1",
        json!({"game_score": 30.0}),
    )
    .await;

    let (status, body) = send_json(server.addr, "POST", "/api/finalize_results", json!(null)).await;
    assert_eq!(status, 200);
    let result: Value = serde_json::from_str(&body).expect("finalize json");
    assert_eq!(result["message"], "Results finalized");
    assert_eq!(result["top_teams"], json!([3, 7, 1]));

    // Idempotent and side-effect free.
    let (status, body) = send_json(server.addr, "POST", "/api/finalize_results", json!(null)).await;
    assert_eq!(status, 200);
    let again: Value = serde_json::from_str(&body).expect("finalize json");
    assert_eq!(again["top_teams"], json!([3, 7, 1]));
}

#[tokio::test]
async fn disallowed_extension_is_rejected_and_leaves_photo_unset() {
    let server = spawn_server().await;

    let (status, body) = upload_photo(server.addr, 1, "photo", "notes.txt", b"not an image").await;
    assert_eq!(status, 400);
    let error: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(error["error"], "Invalid file type");

    let team = fetch_team(server.addr, 1).await;
    assert!(team["photo_url"].is_null());
}

#[tokio::test]
async fn missing_photo_field_is_rejected() {
    let server = spawn_server().await;

    let (status, body) = upload_photo(server.addr, 1, "attachment", "crew.png", b"png").await;
    assert_eq!(status, 400);
    let error: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(error["error"], "No file provided");
}

#[tokio::test]
async fn second_upload_replaces_the_stored_file() {
    let server = spawn_server().await;

    let (status, body) = upload_photo(server.addr, 1, "photo", "crew.png", b"first image").await;
    assert_eq!(status, 200);
    let result: Value = serde_json::from_str(&body).expect("upload json");
    assert_eq!(result["message"], "Photo uploaded successfully");
    assert_eq!(result["photo_url"], "/static/uploads/team_1_crew.png");
    assert!(server.upload_dir.join("team_1_crew.png").exists());

    // The stored file is served back under /static/uploads/.
    let (status, _, served) = get(server.addr, "/static/uploads/team_1_crew.png").await;
    assert_eq!(status, 200);
    assert_eq!(served, "first image");

    let (status, body) = upload_photo(server.addr, 1, "photo", "updated.jpg", b"second image").await;
    assert_eq!(status, 200);
    let result: Value = serde_json::from_str(&body).expect("upload json");
    assert_eq!(result["photo_url"], "/static/uploads/team_1_updated.jpg");

    assert!(!server.upload_dir.join("team_1_crew.png").exists());
    assert!(server.upload_dir.join("team_1_updated.jpg").exists());

    let team = fetch_team(server.addr, 1).await;
    assert_eq!(team["photo_url"], "/static/uploads/team_1_updated.jpg");
}

#[tokio::test]
async fn performances_are_listed_in_program_order() {
    let server = spawn_server().await;

    let (status, _, body) = get(server.addr, "/api/performances").await;
    assert_eq!(status, 200);
    let performances: Vec<Value> = serde_json::from_str(&body).expect("performances json");
    assert_eq!(performances.len(), 8);

    let ids: Vec<i64> = performances
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    assert!(performances.iter().all(|p| p["is_completed"] == json!(false)));
    assert!(performances.iter().all(|p| p["completed_at"].is_null()));
}

#[tokio::test]
async fn completing_twice_is_an_idempotent_noop() {
    let server = spawn_server().await;

    let (status, body) = send_json(
        server.addr,
        "POST",
        "/api/performances/1/complete",
        json!(null),
    )
    .await;
    assert_eq!(status, 200);
    let completed: Value = serde_json::from_str(&body).expect("performance json");
    assert_eq!(completed["is_completed"], json!(true));
    let first_timestamp = completed["completed_at"]
        .as_str()
        .expect("completed_at set")
        .to_string();

    let (status, body) = send_json(
        server.addr,
        "POST",
        "/api/performances/1/complete",
        json!(null),
    )
    .await;
    assert_eq!(status, 200);
    let noop: Value = serde_json::from_str(&body).expect("noop json");
    assert_eq!(noop["message"], "Performance already marked as completed");
    assert_eq!(
        noop["performance"]["completed_at"].as_str().unwrap(),
        first_timestamp
    );
}

#[tokio::test]
async fn uncomplete_clears_the_timestamp() {
    let server = spawn_server().await;

    send_json(
        server.addr,
        "POST",
        "/api/performances/2/complete",
        json!(null),
    )
    .await;

    let (status, body) = send_json(
        server.addr,
        "POST",
        "/api/performances/2/uncomplete",
        json!(null),
    )
    .await;
    assert_eq!(status, 200);
    let performance: Value = serde_json::from_str(&body).expect("performance json");
    assert_eq!(performance["is_completed"], json!(false));
    assert!(performance["completed_at"].is_null());

    // A second uncomplete reports the no-op instead of erroring.
    let (status, body) = send_json(
        server.addr,
        "POST",
        "/api/performances/2/uncomplete",
        json!(null),
    )
    .await;
    assert_eq!(status, 200);
    let noop: Value = serde_json::from_str(&body).expect("noop json");
    assert_eq!(noop["message"], "Performance is not marked as completed");
}

#[tokio::test]
async fn unknown_performance_is_not_found() {
    let server = spawn_server().await;

    let (status, _) = send_json(
        server.addr,
        "POST",
        "/api/performances/999/complete",
        json!(null),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn notes_update_requires_the_notes_field() {
    let server = spawn_server().await;

    let (status, body) = send_json(
        server.addr,
        "PUT",
        "/api/performances/5/notes",
        json!({"notes": "Bring a spare mic"}),
    )
    .await;
    assert_eq!(status, 200);
    let performance: Value = serde_json::from_str(&body).expect("performance json");
    assert_eq!(performance["notes"], "Bring a spare mic");

    let (status, body) = send_json(server.addr, "PUT", "/api/performances/5/notes", json!({})).await;
    assert_eq!(status, 400);
    let error: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(error["error"], "Missing required field: notes");

    let (_, _, body) = get(server.addr, "/api/performances").await;
    let performances: Vec<Value> = serde_json::from_str(&body).expect("performances json");
    let fifth = performances.iter().find(|p| p["id"] == json!(5)).unwrap();
    assert_eq!(fifth["notes"], "Bring a spare mic");
}

#[tokio::test]
async fn root_redirects_to_the_leaderboard() {
    let server = spawn_server().await;

    let (status, head, _) = get(server.addr, "/").await;
    assert!((300..400).contains(&status), "expected redirect, got {status}");
    assert!(head.to_lowercase().contains("location: /leaderboard"));
}

#[tokio::test]
async fn html_views_render_current_state() {
    let server = spawn_server().await;

    send_json(
        server.addr,
        "PUT",
        "/api/teams/4",
        json!({"song_score": 25.0}),
    )
    .await;

    let (status, _, admin) = get(server.addr, "/admin").await;
    assert_eq!(status, 200);
    assert!(admin.contains("Team Alpha"));
    assert!(admin.contains("upload_photo") || admin.contains("photo-upload"));

    let (status, _, leaderboard) = get(server.addr, "/leaderboard").await;
    assert_eq!(status, 200);
    // The scored team leads the table.
    let delta = leaderboard.find("Team Delta").expect("scored team shown");
    let alpha = leaderboard.find("Team Alpha").expect("other team shown");
    assert!(delta < alpha);

    let (status, _, tracker) = get(server.addr, "/performances").await;
    assert_eq!(status, 200);
    assert!(tracker.contains("Priya Sharma"));
    assert!(tracker.contains("Complete"));
}
