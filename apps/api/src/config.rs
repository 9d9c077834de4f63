use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on variants accepted by one batch resolve request.
    pub max_batch_variants: usize,
    pub cors_permissive: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_batch_variants: env_or("MAX_BATCH_VARIANTS", "50")
                .parse::<usize>()
                .context("MAX_BATCH_VARIANTS must be a non-negative integer")?,
            cors_permissive: env_or("CORS_PERMISSIVE", "true")
                .parse::<bool>()
                .context("CORS_PERMISSIVE must be 'true' or 'false'")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_batch_variants: 50,
            cors_permissive: true,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
