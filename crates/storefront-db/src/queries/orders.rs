//! Order operations.

use rusqlite::{Connection, OptionalExtension};
use storefront_common::{CustomerId, OrderId, ProductId, Result};

use crate::error::{query_error, write_error};
use crate::models::{time_to_micros, CustomerOrder, Order};

const COLS: &str = "id, customer_id, init_time";

/// Insert a batch of orders with one prepared statement.
///
/// Every `customer_id` must already exist; otherwise the foreign key check
/// fails with a constraint error.
pub fn insert_orders(conn: &Connection, orders: &[Order]) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO orders (id, customer_id, init_time) VALUES (?1, ?2, ?3)")
        .map_err(write_error)?;

    let mut inserted = 0;
    for o in orders {
        inserted += stmt
            .execute(rusqlite::params![
                o.id.get(),
                o.customer_id.get(),
                time_to_micros(&o.init_time)
            ])
            .map_err(write_error)?;
    }
    Ok(inserted)
}

/// Get an order by ID.
pub fn get_order(conn: &Connection, id: OrderId) -> Result<Option<Order>> {
    let q = format!("SELECT {COLS} FROM orders WHERE id = ?1");
    conn.query_row(&q, [id.get()], Order::from_row)
        .optional()
        .map_err(query_error)
}

/// List all orders ordered by id.
pub fn list_orders(conn: &Connection) -> Result<Vec<Order>> {
    let q = format!("SELECT {COLS} FROM orders ORDER BY id");
    collect(conn, &q, [])
}

/// Count all orders.
pub fn count_orders(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .map_err(query_error)
}

/// A customer's orders ordered by id.
pub fn list_orders_for_customer(conn: &Connection, customer_id: CustomerId) -> Result<Vec<Order>> {
    let q = format!("SELECT {COLS} FROM orders WHERE customer_id = ?1 ORDER BY id");
    collect(conn, &q, [customer_id.get()])
}

/// Orders that carry `product_id`, ordered by id.
pub fn list_orders_for_product(conn: &Connection, product_id: ProductId) -> Result<Vec<Order>> {
    let q = format!(
        "SELECT {COLS} FROM orders WHERE id IN
           (SELECT order_id FROM order_product WHERE product_id = ?1)
         ORDER BY id"
    );
    collect(conn, &q, [product_id.get()])
}

/// The customer's most recent order(s), joined with the customer row.
///
/// Selects every order whose `init_time` equals the customer's maximum
/// `init_time`. When several orders share that timestamp all of them are
/// returned, ordered by order id. A customer without orders yields an
/// empty list.
pub fn latest_orders_for_customer(
    conn: &Connection,
    customer_id: CustomerId,
) -> Result<Vec<CustomerOrder>> {
    let mut stmt = conn
        .prepare(
            "SELECT o.id, o.customer_id, o.init_time,
                    c.id, c.name, c.surname, c.email
             FROM orders o
             JOIN customers c ON c.id = o.customer_id
             WHERE o.customer_id = ?1
               AND o.init_time =
                   (SELECT MAX(init_time) FROM orders WHERE customer_id = ?1)
             ORDER BY o.id",
        )
        .map_err(query_error)?;
    let rows = stmt
        .query_map([customer_id.get()], CustomerOrder::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}

fn collect<P: rusqlite::Params>(conn: &Connection, q: &str, params: P) -> Result<Vec<Order>> {
    let mut stmt = conn.prepare(q).map_err(query_error)?;
    let rows = stmt
        .query_map(params, Order::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}
