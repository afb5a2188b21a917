//! Table definitions for the storefront schema.
//!
//! The DDL has no `IF NOT EXISTS` guards: creating the schema twice on the
//! same store is an error, not a no-op.

use rusqlite::Connection;
use storefront_common::Result;
use tracing::debug;

use crate::error::{query_error, schema_error};

/// Tables created by [`create_schema`], in dependency order.
pub const TABLES: [&str; 4] = ["customers", "products", "orders", "order_product"];

/// Schema DDL: customers, products, orders and the order/product association.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE customers (
    id      INTEGER PRIMARY KEY,
    name    TEXT NOT NULL CHECK (length(name) <= 20),
    surname TEXT NOT NULL CHECK (length(surname) <= 20),
    email   TEXT NOT NULL CHECK (length(email) <= 255)
);

CREATE TABLE products (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL CHECK (length(name) <= 64),
    price INTEGER NOT NULL CHECK (price >= 0)
);

-- init_time is microseconds since the Unix epoch (UTC)
CREATE TABLE orders (
    id          INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customers(id),
    init_time   INTEGER NOT NULL
);

CREATE TABLE order_product (
    order_id   INTEGER NOT NULL REFERENCES orders(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    PRIMARY KEY (order_id, product_id)
);

CREATE INDEX idx_orders_customer         ON orders(customer_id);
CREATE INDEX idx_order_product_product   ON order_product(product_id);
"#;

/// Create all storefront tables on `conn`.
///
/// Fails with [`storefront_common::Error::Schema`] if any of the objects
/// already exist.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(schema_error)?;
    debug!(tables = TABLES.len(), "schema created");
    Ok(())
}

/// List the user tables present in the store, sorted by name.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(query_error)?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(query_error)?;
    Ok(names)
}
