//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_AGE_API_URL: &str = "https://api.agify.io";
pub const DEFAULT_GENDER_API_URL: &str = "https://api.genderize.io";
pub const DEFAULT_NATIONALITY_API_URL: &str = "https://api.nationalize.io";

/// Base URLs and transport timeout for the three lookup services.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub age_url: String,
    pub gender_url: String,
    pub nationality_url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            age_url: DEFAULT_AGE_API_URL.to_string(),
            gender_url: DEFAULT_GENDER_API_URL.to_string(),
            nationality_url: DEFAULT_NATIONALITY_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            age_url: var_or("AGE_API_URL", DEFAULT_AGE_API_URL),
            gender_url: var_or("GENDER_API_URL", DEFAULT_GENDER_API_URL),
            nationality_url: var_or("NATIONALITY_API_URL", DEFAULT_NATIONALITY_API_URL),
            timeout: Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", 10)?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub pg_pool_max: u32,
    pub http_addr: String,
    /// Request-scoped timeout for every inbound HTTP request.
    pub request_timeout: Duration,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            database_url: database_url()?,
            pg_pool_max: parse_var("PG_POOL_MAX", 5)?,
            http_addr: var_or("HTTP_ADDR", "0.0.0.0:8080"),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 60)?),
            upstream: UpstreamConfig::from_env()?,
        })
    }
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number, got {:?}", key, v)),
        _ => Ok(default),
    }
}
