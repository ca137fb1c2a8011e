//! Data store gateway for the Opus API.
//!
//! Row models, Postgres repositories, and the [`StyleStore`] trait that
//! route handlers depend on. [`PgStyleStore`] backs production;
//! [`MemoryStyleStore`] stands in for it in tests.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::memory::MemoryStyleStore;
pub use store::postgres::PgStyleStore;
pub use store::StyleStore;

pub type DbPool = sqlx::PgPool;

/// Build connection options from an endpoint URL and a separately
/// supplied password.
pub fn connect_options(database_url: &str, password: &str) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(database_url)?.password(password))
}

/// Create a connection pool.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
