//! Configuration module
//!
//! Settings are loaded once at startup from environment variables (with a
//! `.env` file honored by the binary) and validated before any connection
//! is opened. Handlers receive long-lived handles built from this config;
//! nothing here is re-read per request.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Upload ceiling: 10 MB, enforced before any normalize/store/persist step.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for avatar and game images.
pub const ALLOWED_IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Remote image store (S3-compatible)
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
    // Upload constraints
    pub max_upload_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let server_port = env_parse("SERVER_PORT", DEFAULT_SERVER_PORT)?;
        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let db_timeout_seconds = env_parse("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS)?;
        let max_upload_size_bytes = env_parse("MAX_UPLOAD_SIZE_BYTES", MAX_UPLOAD_SIZE_BYTES)?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let s3_bucket =
            env::var("S3_BUCKET").map_err(|_| anyhow::anyhow!("S3_BUCKET must be set"))?;
        let s3_region = env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let s3_endpoint = env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        Ok(Config {
            server_port,
            cors_origins,
            database_url,
            db_max_connections,
            db_timeout_seconds,
            s3_bucket,
            s3_region,
            s3_endpoint,
            max_upload_size_bytes,
            allowed_content_types: ALLOWED_IMAGE_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    /// Fail-fast sanity checks, run once before connecting anywhere.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_BYTES must be at least 1");
        }
        if self.s3_bucket.is_empty() {
            anyhow::bail!("S3_BUCKET must not be empty");
        }
        if let Some(ref endpoint) = self.s3_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                anyhow::bail!("S3_ENDPOINT must be an http(s) URL, got: {}", endpoint);
            }
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value for {}", raw, key)),
        Err(_) => Ok(default),
    }
}
