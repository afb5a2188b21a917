//! Order/product association operations.

use rusqlite::Connection;
use storefront_common::Result;

use crate::error::{query_error, write_error};
use crate::models::OrderProduct;

/// Insert a batch of association rows with one prepared statement.
///
/// Both sides must already exist. A repeated `(order, product)` pair is
/// rejected by the composite primary key.
pub fn insert_order_products(conn: &Connection, links: &[OrderProduct]) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO order_product (order_id, product_id) VALUES (?1, ?2)")
        .map_err(write_error)?;

    let mut inserted = 0;
    for link in links {
        inserted += stmt
            .execute([link.order_id.get(), link.product_id.get()])
            .map_err(write_error)?;
    }
    Ok(inserted)
}

/// List all association rows ordered by (order, product).
pub fn list_order_products(conn: &Connection) -> Result<Vec<OrderProduct>> {
    let mut stmt = conn
        .prepare("SELECT order_id, product_id FROM order_product ORDER BY order_id, product_id")
        .map_err(query_error)?;
    let rows = stmt
        .query_map([], OrderProduct::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}

/// Count all association rows.
pub fn count_order_products(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM order_product", [], |row| row.get(0))
        .map_err(query_error)
}
