//! Application state

use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::geocode::Geocoder;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for user authentication
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Reverse geocoding client
    pub geocoder: Geocoder,
}

impl AppState {
    /// Open the database and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = crate::db::connect(&config.database_url).await?;
        Self::with_pool(pool, config)
    }

    /// Build the state around an existing pool
    pub fn with_pool(pool: SqlitePool, config: &Config) -> Result<Self, BoxError> {
        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiry_hours: config.jwt_expiry_hours,
            geocoder: Geocoder::new(&config.geocoder_base_url, &config.geocoder_user_agent)?,
        })
    }
}
