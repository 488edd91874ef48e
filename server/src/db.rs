//! Postgres connection pool for generated recipes.

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Connections kept when STOVETOP_DB_POOL_SIZE is unset.
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Error)]
pub enum DbSetupError {
    #[error("could not connect to the recipe database: {0}")]
    Connect(#[from] PoolError),

    #[error("could not apply recipe table migrations: {0}")]
    Migrate(String),
}

/// Open a pool of `max_size` connections and bring the schema up to date.
///
/// Fails if the database is unreachable or a migration does not apply.
pub fn connect(database_url: &str, max_size: u32) -> Result<DbPool, DbSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().max_size(max_size).build(manager)?;

    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbSetupError::Migrate(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "Applied database migrations");
    }

    Ok(pool)
}

/// Pool size from STOVETOP_DB_POOL_SIZE, falling back to the default when the
/// variable is unset, unparseable or zero.
pub fn pool_size_from_env() -> u32 {
    parse_pool_size(std::env::var("STOVETOP_DB_POOL_SIZE").ok().as_deref())
}

fn parse_pool_size(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(DEFAULT_POOL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_parsing() {
        assert_eq!(parse_pool_size(None), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("4")), 4);
        assert_eq!(parse_pool_size(Some(" 16 ")), 16);
        assert_eq!(parse_pool_size(Some("0")), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("many")), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_unreachable_database_is_a_connect_error() {
        // Port 1 on localhost refuses connections; r2d2 gives up after its
        // connection timeout.
        let manager = ConnectionManager::<PgConnection>::new("postgres://nobody@127.0.0.1:1/none");
        let err = r2d2::Pool::builder()
            .max_size(1)
            .connection_timeout(std::time::Duration::from_millis(200))
            .build(manager)
            .map_err(DbSetupError::from)
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("could not connect to the recipe database"));
    }
}
