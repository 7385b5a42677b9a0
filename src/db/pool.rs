//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async. SQLite has no native
//! async driver, so every pooled connection is a blocking `SqliteConnection`
//! behind diesel_async's `SyncConnectionWrapper`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult};
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Connection type handed out by the pool.
pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
/// Structures holding AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<DbConnection>;

/// Applied to every new connection. Writers wait on the database lock for
/// up to five seconds instead of failing with `SQLITE_BUSY`, and WAL lets
/// readers proceed while a write is in progress.
pub const CONNECTION_PRAGMAS: &str =
    "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;";

/// Strips the `sqlite://` / `sqlite:` scheme so diesel receives a plain file path.
///
/// # Example
///
/// ```
/// use grocery_store_api::db::normalize_database_url;
///
/// assert_eq!(normalize_database_url("sqlite://data/customers.db"), "data/customers.db");
/// assert_eq!(normalize_database_url("customers.db"), "customers.db");
/// ```
pub fn normalize_database_url(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Creates an async database connection pool from the database configuration.
///
/// # Errors
///
/// - `AppError::ConnectionPool` - If the initial connections cannot be established
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await?;
/// ```
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let database_url = normalize_database_url(&config.url);
    let mut manager_config = ManagerConfig::<DbConnection>::default();
    manager_config.custom_setup = Box::new(setup_connection);
    let manager =
        AsyncDieselConnectionManager::<DbConnection>::new_with_config(database_url, manager_config);

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await?;

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "SQLite connection pool built"
    );

    Ok(pool)
}

fn setup_connection(
    database_url: &str,
) -> Pin<Box<dyn Future<Output = ConnectionResult<DbConnection>> + Send + '_>> {
    Box::pin(establish_connection(database_url.to_string()))
}

/// Opens one pooled connection and applies `CONNECTION_PRAGMAS`.
async fn establish_connection(database_url: String) -> ConnectionResult<DbConnection> {
    let mut conn = DbConnection::establish(&database_url).await?;
    conn.batch_execute(CONNECTION_PRAGMAS)
        .await
        .map_err(ConnectionError::CouldntSetupConfiguration)?;
    Ok(conn)
}
