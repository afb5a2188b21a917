//! Connection pool management for SQLite via r2d2.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use storefront_common::{Error, Result};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Initialize a database pool backed by a file on disk.
///
/// Creates the SQLite file if it does not exist and enables foreign keys on
/// every new connection. No tables are created here: the schema lives inside
/// the per-run scratch transaction.
pub fn init_pool(db_path: &str, max_size: u32) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    build(manager, max_size)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {e}")))
}

/// Initialize an in-memory database pool.
///
/// Each call creates a uniquely-named shared-cache in-memory database so
/// that parallel tests do not interfere with each other, while all
/// connections *within* a single pool still share state.
pub fn init_memory_pool() -> Result<DbPool> {
    init_memory_pool_sized(DEFAULT_POOL_SIZE)
}

/// Same as [`init_memory_pool`] with an explicit pool size.
pub fn init_memory_pool_sized(max_size: u32) -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:storefront_mem_{}_{n}?mode=memory&cache=shared", std::process::id());

    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    build(manager, max_size)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {e}")))
}

fn build(manager: SqliteConnectionManager, max_size: u32) -> std::result::Result<DbPool, r2d2::Error> {
    Pool::builder().max_size(max_size).build(manager)
}

/// Convenience helper to get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {e}")))
}
