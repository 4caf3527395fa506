//! Storage layer for the atelier content backend.
//!
//! - [`models`] -- record shapes and their [`atelier_core::entity::EntityKind`] bindings.
//! - [`store`] -- collaborator traits the service layer talks to.
//! - [`repositories`] -- PostgreSQL implementations (sqlx).
//! - [`memory`] -- in-memory implementations for tests and local tooling.

use sqlx::postgres::PgPoolOptions;

pub mod capability;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
