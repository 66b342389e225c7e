use sqlx::{
    Pool, Sqlite, Transaction,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::{error, info};

/// Requests queue on the one connection instead of timing out.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 365);

pub type ConnectionPool = Pool<Sqlite>;

pub struct ConnectionManager;

impl ConnectionManager {
    /// Opens the single shared store connection. The pool holds exactly one
    /// connection and never recycles it.
    pub async fn new_pool(connection_string: &str) -> anyhow::Result<ConnectionPool> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .map_err(|err| anyhow::anyhow!("Invalid database url {connection_string}: {err}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|err| anyhow::anyhow!("Failed to create database connection pool: {}", err))?;

        info!("🗄️ Connected to SQLite store at {connection_string}");

        Ok(pool)
    }
}

/// Rolls back `tx`. A rollback failure is logged, not returned.
pub async fn rollback(tx: Transaction<'_, Sqlite>, operation: &str) {
    match tx.rollback().await {
        Ok(()) => info!("↩️ Rolled back transaction for {operation}"),
        Err(err) => error!("❌ Failed to roll back transaction for {operation}: {err:?}"),
    }
}
