//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::Duration;
use crate::config::settings::DatabaseConfig;
use crate::utils::errors::VolunteerPayError;

pub type DatabasePool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, VolunteerPayError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(Some(IDLE_TIMEOUT))
        .max_lifetime(Some(MAX_LIFETIME))
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created successfully"
    );
    Ok(pool)
}

/// Apply the `events` / `participants` schema
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), VolunteerPayError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), VolunteerPayError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}
