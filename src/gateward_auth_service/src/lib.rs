pub mod auth_service;
pub mod tracing;

pub use auth_service::AuthService;

use gateward_adapters::config::DatabaseSettings;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the configured database URL and runs all
/// pending migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations
pub async fn configure_postgresql(settings: &DatabaseSettings) -> PgPool {
    let pg_pool = get_postgres_pool(settings.url.expose_secret())
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}
