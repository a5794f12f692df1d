use log::info;
use rocket::{catchers, routes, Build, Rocket};

use crate::config::{ConfigError, ServerConfig};
use crate::cors::Cors;
use crate::database::{requests, MemoryStore, SharedStore, SqlStore};

#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Database(sqlx::Error),
}

impl std::error::Error for StartupError {}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "invalid configuration: {}", error),
            Self::Database(error) => write!(f, "failed to open the scores database: {}", error),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<sqlx::Error> for StartupError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database(error)
    }
}

/// Reads the configuration, opens the store and builds the rocket.
pub async fn rocket() -> Result<Rocket<Build>, StartupError> {
    let config = ServerConfig::from_env()?;
    let store = open_store(&config).await?;
    Ok(build(store))
}

pub async fn open_store(config: &ServerConfig) -> Result<SharedStore, StartupError> {
    let store: SharedStore = match &config.database_url {
        Some(database_url) => Box::new(
            SqlStore::connect(
                database_url,
                config.max_connections,
                config.leaderboard_size,
            )
            .await?,
        ),
        None => {
            info!("DATABASE_URL is not set, keeping scores in memory");
            Box::new(MemoryStore::new(config.leaderboard_size))
        }
    };
    Ok(store)
}

pub fn build(store: SharedStore) -> Rocket<Build> {
    rocket::build()
        .mount(
            "/",
            routes![
                requests::index,
                requests::get_scores,
                requests::add_score,
                requests::preflight
            ],
        )
        .register("/", catchers![requests::default_catcher])
        .attach(Cors)
        .manage::<SharedStore>(store)
}
