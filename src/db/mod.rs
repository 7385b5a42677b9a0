//! Database connection pool module.
//!
//! Provides async SQLite connection pooling using diesel_async with bb8,
//! and the embedded schema migrations.

mod migrations;
mod pool;

pub use migrations::{
    MIGRATIONS, applied_migrations, pending_migrations, revert_migrations, run_pending_migrations,
};
pub use pool::{
    AsyncDbPool, CONNECTION_PRAGMAS, DbConnection, establish_async_connection_pool,
    normalize_database_url,
};
