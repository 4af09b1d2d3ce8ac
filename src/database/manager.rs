use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Single connection pool, lazily initialized from DATABASE_URL.
pub struct Database;

impl Database {
    pub async fn pool() -> Result<&'static PgPool, StoreError> {
        POOL.get_or_try_init(Self::connect).await
    }

    async fn connect() -> Result<PgPool, StoreError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        // Fail early on malformed URLs rather than inside the pool
        url::Url::parse(&database_url).map_err(|_| StoreError::InvalidDatabaseUrl)?;

        let db_config = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout_secs))
            .connect(&database_url)
            .await?;

        info!("Created database pool");
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), StoreError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Apply embedded migrations
    pub async fn migrate() -> Result<(), StoreError> {
        let pool = Self::pool().await?;
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        info!("Migrations applied");
        Ok(())
    }
}
