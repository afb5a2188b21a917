//! Customer/order join projections.

use rusqlite::Connection;
use storefront_common::Result;

use crate::error::query_error;
use crate::models::CustomerOrderRow;

/// Every customer paired with each of their order ids (inner join).
///
/// Customers without orders are absent. Ordered by customer id, then
/// order id.
pub fn customers_with_orders(conn: &Connection) -> Result<Vec<CustomerOrderRow>> {
    collect(
        conn,
        "SELECT c.id, c.name, c.surname, o.id
         FROM customers c
         JOIN orders o ON c.id = o.customer_id
         ORDER BY c.id, o.id",
    )
}

/// Every customer paired with each order id, or NULL when they have none
/// (left outer join). Ordered by customer id, then order id.
pub fn customers_with_optional_orders(conn: &Connection) -> Result<Vec<CustomerOrderRow>> {
    collect(
        conn,
        "SELECT c.id, c.name, c.surname, o.id
         FROM customers c
         LEFT JOIN orders o ON c.id = o.customer_id
         ORDER BY c.id, o.id",
    )
}

fn collect(conn: &Connection, q: &str) -> Result<Vec<CustomerOrderRow>> {
    let mut stmt = conn.prepare(q).map_err(query_error)?;
    let rows = stmt
        .query_map([], CustomerOrderRow::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}
