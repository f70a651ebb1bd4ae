use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const INSIGHT_REFRESH_DAYS: RangeInclusive<i64> = 1..=365;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Days an industry insight stays fresh before the dashboard regenerates it.
    pub insight_refresh_days: i64,
    /// Resume editing sessions untouched for this long are dropped from memory.
    pub session_idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let insight_refresh_days: i64 = parse_or(&var, "INSIGHT_REFRESH_DAYS", 7)?;
        if !INSIGHT_REFRESH_DAYS.contains(&insight_refresh_days) {
            bail!(
                "INSIGHT_REFRESH_DAYS must be between {} and {}, got {insight_refresh_days}",
                INSIGHT_REFRESH_DAYS.start(),
                INSIGHT_REFRESH_DAYS.end()
            );
        }

        let idle_secs: u64 = parse_or(&var, "SESSION_IDLE_TIMEOUT_SECS", 1800)?;
        if idle_secs == 0 {
            bail!("SESSION_IDLE_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            database_url: require(&var, "DATABASE_URL")?,
            database_max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 10)?,
            anthropic_api_key: require(&var, "ANTHROPIC_API_KEY")?,
            port: parse_or(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            insight_refresh_days,
            session_idle_timeout: Duration::from_secs(idle_secs),
        })
    }
}

fn require(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
