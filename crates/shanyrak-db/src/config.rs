use std::time::Duration;

use shanyrak_core::AppError;

/// Configuration for the PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

    /// Read configuration from environment variables.
    ///
    /// - `DATABASE_URL` (required)
    /// - `DATABASE_MAX_CONNECTIONS` (optional, defaults to 5)
    /// - `DATABASE_ACQUIRE_TIMEOUT_SECS` (optional, defaults to 5)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`DatabaseConfig::from_env`] with a custom variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let url = var("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError("DATABASE_URL not set. Required for database operations.".into())
        })?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            None => Self::DEFAULT_MAX_CONNECTIONS,
            Some(raw) => parse_positive(&raw, "DATABASE_MAX_CONNECTIONS")?,
        };

        let acquire_timeout = match var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            None => Duration::from_secs(Self::DEFAULT_ACQUIRE_TIMEOUT_SECS),
            Some(raw) => Duration::from_secs(parse_positive::<u64>(
                &raw,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
            )?),
        };

        Ok(Self {
            url,
            max_connections,
            acquire_timeout,
        })
    }
}

fn parse_positive<T>(raw: &str, name: &str) -> Result<T, AppError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    let parsed: T = raw.parse().map_err(|_| {
        AppError::ConfigError(format!(
            "Invalid {name} '{raw}': must be a positive integer"
        ))
    })?;
    if parsed < T::from(1) {
        return Err(AppError::ConfigError(format!("{name} must be at least 1")));
    }
    Ok(parsed)
}
