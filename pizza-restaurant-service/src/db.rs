use std::env;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;

use crate::error::ApiError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite only enforces foreign keys (and `ON DELETE CASCADE`) per connection.
#[derive(Debug)]
struct EnforceForeignKeys;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for EnforceForeignKeys {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(EnforceForeignKeys))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

pub fn establish_pool() -> Result<DbPool, PoolError> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let pool_size = env::var("DATABASE_POOL_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_POOL_SIZE);

    build_pool(&database_url, pool_size)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Runs blocking diesel work on a pooled connection off the async runtime.
pub async fn interact<F, T>(pool: &DbPool, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut pooled = pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        f(conn)
    })
    .await?
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    // One connection keeps the in-memory database alive for the whole test.
    let pool = build_pool(":memory:", 1).unwrap();
    run_migrations(&pool).unwrap();
    pool
}
