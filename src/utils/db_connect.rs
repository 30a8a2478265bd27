use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, SimpleAsyncConnection};
use eyre::{Error, Result};
use log::info;

use crate::utils::constants::DB_POOL_SIZE;

/// Pool of async Postgres connections
pub type DbPool = Pool<AsyncPgConnection>;

/// Schema applied by `migrate`
const SCHEMA: &str = include_str!("../../migrations/00000000000001_create_discovery_tables/up.sql");

/// Creates the connection pool.
///
/// The pool is handed to the stores explicitly; nothing here is global.
///
/// # Returns
/// * `Result<DbPool>` - The connection pool
///
/// # Errors
/// * If pool creation fails
pub fn create_pool(database_url: &str, max_size: usize) -> Result<DbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    DbPool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| Error::msg(format!("Failed to create connection pool: {e}")))
}

/// Creates the connection pool from `DATABASE_URL`.
///
/// # Errors
/// * If `DATABASE_URL` environment variable is not set
/// * If pool creation fails
pub fn pool_from_env() -> Result<DbPool> {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| Error::msg("DATABASE_URL must be set"))?;
    create_pool(&database_url, DB_POOL_SIZE)
}

/// Applies the discovery schema. Safe to run repeatedly.
///
/// # Errors
/// * If getting a connection from the pool fails
/// * If any statement of the schema fails
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .await
        .map_err(|e| Error::msg(format!("Failed to get connection: {e}")))?;
    conn.batch_execute(SCHEMA).await?;
    info!("db_connect::run_migrations: Schema is up to date");
    Ok(())
}
