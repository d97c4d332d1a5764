//! Configuration module
//!
//! Process configuration read from the environment (and an optional `.env` file):
//! listen address, database connection, upload directory, request body limit, and
//! the secret used to sign flash cookies.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_CONTENT_LENGTH: usize = 32 * 1024 * 1024;

/// Signing key used when `SECRET_KEY` is not set. Rejected in production.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hibiki.db";
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub secret_key: String,
    pub upload_folder: PathBuf,
    pub max_content_length: usize,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: SERVER_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            upload_folder: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            max_content_length: MAX_CONTENT_LENGTH,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .map(|s| {
                s.parse::<u16>()
                    .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT '{}': {}", s, e))
            })
            .transpose()?
            .unwrap_or(SERVER_PORT);

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .unwrap_or(MAX_CONNECTIONS);

        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(CONNECTION_TIMEOUT_SECS);

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!(
                    "SECRET_KEY not configured, using insecure default. This must be set in production."
                );
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        let upload_folder = env::var("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_folder);

        let max_content_length = env::var("MAX_CONTENT_LENGTH")
            .unwrap_or_else(|_| MAX_CONTENT_LENGTH.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_CONTENT_LENGTH);

        Ok(Config {
            server_host,
            server_port,
            database_url,
            db_max_connections,
            db_timeout_seconds,
            secret_key,
            upload_folder,
            max_content_length,
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
