//! Store handle passed explicitly to every operation.
//!
//! A [`Store`] owns the connection pool and the settings it was opened
//! with. Work that must not persist runs through [`Store::scratch`], which
//! wraps it in a transaction that is always rolled back.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use storefront_common::{Error, Result};
use tracing::{debug, info};

use crate::pool::{self, DbPool, PooledConnection, DEFAULT_POOL_SIZE};

/// Path value selecting a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file path, or `:memory:`.
    pub path: String,
    pub pool_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: MEMORY_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl StoreConfig {
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Check the settings before a pool is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(Error::validation("store.path cannot be empty"));
        }
        if self.pool_size == 0 {
            return Err(Error::validation("store.pool_size must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Store {
    pool: DbPool,
    config: StoreConfig,
}

impl Store {
    /// Open the pool described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let pool = if config.is_memory() {
            pool::init_memory_pool_sized(config.pool_size)?
        } else {
            pool::init_pool(&config.path, config.pool_size)?
        };
        info!(path = %config.path, pool_size = config.pool_size, "store opened");

        Ok(Self {
            pool,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> Result<PooledConnection> {
        pool::get_conn(&self.pool)
    }

    /// Run `f` inside a transaction that is rolled back afterwards.
    ///
    /// The rollback happens whether `f` succeeds or fails, so nothing `f`
    /// writes (including DDL) outlives the call. An error from `f` takes
    /// precedence over a rollback error.
    pub fn scratch<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(format!("Failed to begin transaction: {e}")))?;

        let result = f(&tx);

        let rolled_back = tx
            .rollback()
            .map_err(|e| Error::database(format!("Failed to roll back transaction: {e}")));
        debug!(ok = result.is_ok(), "scratch transaction rolled back");

        let value = result?;
        rolled_back?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::customers;
    use crate::{schema, seed};
    use assert_matches::assert_matches;

    #[test]
    fn default_config_is_memory() {
        let config = StoreConfig::default();
        assert!(config.is_memory());
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let config = StoreConfig {
            pool_size: 0,
            ..StoreConfig::default()
        };
        assert_matches!(Store::open(&config), Err(Error::Validation(_)));
    }

    #[test]
    fn blank_path_is_rejected() {
        let config = StoreConfig {
            path: "  ".into(),
            ..StoreConfig::default()
        };
        assert_matches!(config.validate(), Err(Error::Validation(msg)) if msg.contains("path"));
        assert_matches!(Store::open(&config), Err(Error::Validation(_)));
    }

    #[test]
    fn scratch_discards_writes() {
        let store = Store::open(&StoreConfig::default()).unwrap();
        let count = store
            .scratch(|conn| {
                schema::create_schema(conn)?;
                seed::load(conn, chrono::Utc::now())?;
                customers::count_customers(conn)
            })
            .unwrap();
        assert_eq!(count, 6);

        let conn = store.conn().unwrap();
        assert!(schema::table_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn scratch_can_run_again_after_rollback() {
        let store = Store::open(&StoreConfig::default()).unwrap();
        for _ in 0..3 {
            let stats = store
                .scratch(|conn| {
                    schema::create_schema(conn)?;
                    seed::load(conn, chrono::Utc::now())
                })
                .unwrap();
            assert_eq!(stats.customers, 6);
        }
    }

    #[test]
    fn scratch_rolls_back_on_error() {
        let store = Store::open(&StoreConfig::default()).unwrap();
        let err = store
            .scratch(|conn| {
                schema::create_schema(conn)?;
                schema::create_schema(conn)
            })
            .unwrap_err();
        assert_matches!(err, Error::Schema(_));

        let conn = store.conn().unwrap();
        assert!(schema::table_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn file_store_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("shop.db").to_string_lossy().into_owned(),
            pool_size: 1,
        };
        let store = Store::open(&config).unwrap();
        store
            .scratch(|conn| {
                schema::create_schema(conn)?;
                seed::load(conn, chrono::Utc::now())
            })
            .unwrap();
        drop(store);

        let reopened = Store::open(&config).unwrap();
        let conn = reopened.conn().unwrap();
        assert!(schema::table_names(&conn).unwrap().is_empty());
    }
}
