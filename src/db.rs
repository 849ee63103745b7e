use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    error::ErrorKind,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// Open a pool for `database_url`; foreign keys are enforced on every connection.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {}", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("connect to database")
}

/// A private database living for as long as the returned pool.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("connect to in-memory database")?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

fn constraint_kind(err: &sqlx::Error) -> Option<ErrorKind> {
    err.as_database_error().map(|db_err| db_err.kind())
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(constraint_kind(err), Some(ErrorKind::UniqueViolation))
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(constraint_kind(err), Some(ErrorKind::ForeignKeyViolation))
}
