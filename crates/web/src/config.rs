use std::env;

pub const DEV_SESSION_SECRET: &str = "dev-secret-key-change-in-production";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Runtime configuration, read once at startup. Every knob has a safe
/// local default so the service runs with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub upload_dir: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse_or("PORT", 5000),
            database_url: env_or("DATABASE_URL", "sqlite://event_scores.db"),
            session_secret: env_or("SESSION_SECRET", DEV_SESSION_SECRET),
            upload_dir: env_or("UPLOAD_DIR", "static/uploads"),
            max_upload_bytes: env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
