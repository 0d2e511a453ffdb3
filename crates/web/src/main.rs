use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use web::config::{Config, DEV_SESSION_SECRET};
use web::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting event scoreboard");

    let config = Config::from_env();
    if config.session_secret == DEV_SESSION_SECRET {
        tracing::warn!("SESSION_SECRET is unset, using the development default");
    }

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    db.init_schema()
        .await
        .context("Failed to create database schema")?;

    db.seed_if_empty()
        .await
        .context("Failed to seed default data")?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .context("Failed to create upload directory")?;

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind listener")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
