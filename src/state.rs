//! Shared application state

use crate::{
    config::Config, db::StudentRepository, services::StudentService, Error, Result,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
    pub student_service: Arc<StudentService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config_arc = Arc::new(config);

        let db_pool = create_db_pool(config_arc.as_ref()).await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {e}")))?;

        let student_service = Arc::new(StudentService::new(StudentRepository::new(
            db_pool.clone(),
        )));

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config: config_arc,
            db_pool,
            student_service,
        })
    }
}

async fn create_db_pool(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Creating database connection pool...");

    let options = SqliteConnectOptions::from_str(&config.database.url)
        .map_err(Error::Database)?
        .create_if_missing(true)
        // Queue concurrent writers instead of failing immediately.
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
