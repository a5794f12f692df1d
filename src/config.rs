use std::str::FromStr;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const MAX_LEADERBOARD_SIZE: usize = 10_000;
pub const MAX_CONNECTIONS_LIMIT: u32 = 100;

/// Server settings read from the environment (and `.env`).
/// The address and port are Rocket's own `ROCKET_*` settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where scores are persisted. Scores live in memory when unset.
    pub database_url: Option<String>,
    pub leaderboard_size: usize,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let leaderboard_size = bounded_var(
            &lookup,
            "LEADERBOARD_SIZE",
            DEFAULT_LEADERBOARD_SIZE,
            MAX_LEADERBOARD_SIZE,
        )?;
        let max_connections = bounded_var(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
            MAX_CONNECTIONS_LIMIT,
        )?;

        Ok(Self {
            database_url,
            leaderboard_size,
            max_connections,
        })
    }
}

/// Reads a number between one and `max`.
fn bounded_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    max: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialOrd + ToString,
{
    let value = match lookup(key) {
        Some(value) => value,
        None => return Ok(default),
    };

    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() && parsed <= max => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            max: max.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        max: String,
    },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, max } => write!(
                f,
                "environment variable {} must be a number from 1 to {}, got {:?}",
                key, max, value
            ),
        }
    }
}
