use std::env;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::models::BusinessHours;

const TOKEN_ENV: &str = "TELOXIDE_TOKEN";
const LEGACY_TOKEN_ENV: &str = "TELEGRAM_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub hours: BusinessHours,
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .or_else(|| lookup(LEGACY_TOKEN_ENV))
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let opening = number(&lookup, "OPENING_HOUR", 9)?;
        let closing = number(&lookup, "CLOSING_HOUR", 17)?;
        if opening > closing || closing > 23 {
            return Err(ConfigError::InvalidHours { opening, closing });
        }

        let session_ttl = number(&lookup, "SESSION_TTL_SECS", 1800)?;
        if session_ttl == 0 {
            return Err(ConfigError::ZeroDuration("SESSION_TTL_SECS"));
        }
        let cleanup_interval = number(&lookup, "CLEANUP_INTERVAL_SECS", 600)?;
        if cleanup_interval == 0 {
            return Err(ConfigError::ZeroDuration("CLEANUP_INTERVAL_SECS"));
        }

        Ok(Config {
            token,
            hours: BusinessHours { opening_hour: opening, closing_hour: closing },
            session_ttl: Duration::from_secs(session_ttl.into()),
            cleanup_interval: Duration::from_secs(cleanup_interval.into()),
        })
    }
}

fn number<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
