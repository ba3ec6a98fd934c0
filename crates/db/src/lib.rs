//! Record store for the Gadget Store catalog.
//!
//! - [`models`] -- row structs and request DTOs.
//! - [`repositories`] -- SQL for the `products` table.
//! - [`connection`] -- lazy, de-duplicated connection establishment.
//! - [`store`] -- the [`store::ProductStore`] seam handlers depend on, with
//!   PostgreSQL and in-memory implementations.

use sqlx::postgres::PgPoolOptions;

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
