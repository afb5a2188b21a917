//! Storefront-DB: schema, seed data, and query operations
//!
//! This crate provides the storefront data layer on SQLite, using rusqlite
//! and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `pool` - Connection pool management
//! - `store` - Store handle and the rolled-back scratch transaction
//! - `schema` - Table definitions
//! - `models` - Rust models matching the tables and join projections
//! - `queries` - Per-table query operations
//! - `seed` - The fixed demonstration dataset
//! - `catalogue` - The eleven canonical read queries
//!
//! # Example
//!
//! ```
//! use storefront_db::catalogue::{CatalogueQuery, QueryOutput, QueryParams};
//! use storefront_db::store::{Store, StoreConfig};
//! use storefront_db::{schema, seed};
//!
//! let store = Store::open(&StoreConfig::default()).unwrap();
//! let total = store
//!     .scratch(|conn| {
//!         schema::create_schema(conn)?;
//!         seed::load(conn, chrono::Utc::now())?;
//!         CatalogueQuery::CustomerSpend.run(conn, &QueryParams::default())
//!     })
//!     .unwrap();
//! assert_eq!(total, QueryOutput::Sum(140));
//! ```

pub mod catalogue;
pub mod error;
pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;
pub mod seed;
pub mod store;
