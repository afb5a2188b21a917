//! Product operations, including the purchase lookups that walk
//! orders → order_product → products.

use rusqlite::{Connection, OptionalExtension};
use storefront_common::{CustomerId, OrderId, ProductId, Result};

use crate::error::{query_error, write_error};
use crate::models::Product;

const COLS: &str = "id, name, price";

/// Insert a batch of products with one prepared statement.
pub fn insert_products(conn: &Connection, products: &[Product]) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO products (id, name, price) VALUES (?1, ?2, ?3)")
        .map_err(write_error)?;

    let mut inserted = 0;
    for p in products {
        inserted += stmt
            .execute(rusqlite::params![p.id.get(), p.name, p.price])
            .map_err(write_error)?;
    }
    Ok(inserted)
}

/// Get a product by ID.
pub fn get_product(conn: &Connection, id: ProductId) -> Result<Option<Product>> {
    let q = format!("SELECT {COLS} FROM products WHERE id = ?1");
    conn.query_row(&q, [id.get()], Product::from_row)
        .optional()
        .map_err(query_error)
}

/// List all products ordered by id.
pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    let q = format!("SELECT {COLS} FROM products ORDER BY id");
    collect(conn, &q, [])
}

/// Count all products.
pub fn count_products(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .map_err(query_error)
}

/// Products linked to an order through the association table.
pub fn list_products_for_order(conn: &Connection, order_id: OrderId) -> Result<Vec<Product>> {
    let q = format!(
        "SELECT {COLS} FROM products WHERE id IN
           (SELECT product_id FROM order_product WHERE order_id = ?1)
         ORDER BY id"
    );
    collect(conn, &q, [order_id.get()])
}

/// Every product a customer bought across all of their orders.
///
/// Nested membership form; each product appears once even if it was
/// bought on several orders.
pub fn list_products_for_customer(
    conn: &Connection,
    customer_id: CustomerId,
) -> Result<Vec<Product>> {
    let q = format!(
        "SELECT {COLS} FROM products WHERE id IN
           (SELECT product_id FROM order_product WHERE order_id IN
              (SELECT id FROM orders WHERE customer_id = ?1))
         ORDER BY id"
    );
    collect(conn, &q, [customer_id.get()])
}

/// Same row set as [`list_products_for_customer`], via an explicit join chain.
pub fn list_products_for_customer_joined(
    conn: &Connection,
    customer_id: CustomerId,
) -> Result<Vec<Product>> {
    let q = "SELECT DISTINCT p.id, p.name, p.price
             FROM products p
             JOIN order_product op ON op.product_id = p.id
             JOIN orders o         ON o.id = op.order_id
             JOIN customers c      ON c.id = o.customer_id
             WHERE c.id = ?1
             ORDER BY p.id";
    collect(conn, q, [customer_id.get()])
}

/// Sum of prices of the products a customer bought.
///
/// Each distinct product counts once. A customer with no purchases spent 0.
pub fn total_spent_by_customer(conn: &Connection, customer_id: CustomerId) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(price), 0) FROM products WHERE id IN
           (SELECT product_id FROM order_product WHERE order_id IN
              (SELECT id FROM orders WHERE customer_id = ?1))",
        [customer_id.get()],
        |row| row.get(0),
    )
    .map_err(query_error)
}

fn collect<P: rusqlite::Params>(conn: &Connection, q: &str, params: P) -> Result<Vec<Product>> {
    let mut stmt = conn.prepare(q).map_err(query_error)?;
    let rows = stmt
        .query_map(params, Product::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}
