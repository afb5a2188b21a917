//! Customer operations.

use rusqlite::{Connection, OptionalExtension};
use storefront_common::{CustomerId, ProductId, Result};

use crate::error::{query_error, write_error};
use crate::models::Customer;

const COLS: &str = "id, name, surname, email";

/// Insert a batch of customers with one prepared statement.
///
/// Returns the number of rows inserted.
pub fn insert_customers(conn: &Connection, customers: &[Customer]) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO customers (id, name, surname, email)
             VALUES (:id, :name, :surname, :email)",
        )
        .map_err(write_error)?;

    let mut inserted = 0;
    for c in customers {
        inserted += stmt
            .execute(rusqlite::named_params! {
                ":id": c.id.get(),
                ":name": c.name,
                ":surname": c.surname,
                ":email": c.email,
            })
            .map_err(write_error)?;
    }
    Ok(inserted)
}

/// Get a customer by ID.
pub fn get_customer(conn: &Connection, id: CustomerId) -> Result<Option<Customer>> {
    let q = format!("SELECT {COLS} FROM customers WHERE id = ?1");
    conn.query_row(&q, [id.get()], Customer::from_row)
        .optional()
        .map_err(query_error)
}

/// List all customers ordered by id.
pub fn list_customers(conn: &Connection) -> Result<Vec<Customer>> {
    let q = format!("SELECT {COLS} FROM customers ORDER BY id");
    let mut stmt = conn.prepare(&q).map_err(query_error)?;
    let rows = stmt
        .query_map([], Customer::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}

/// Count all customers.
pub fn count_customers(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
        .map_err(query_error)
}

/// Customers that have bought `product_id` on at least one order.
pub fn list_customers_for_product(
    conn: &Connection,
    product_id: ProductId,
) -> Result<Vec<Customer>> {
    let q = format!(
        "SELECT {COLS} FROM customers WHERE id IN
           (SELECT customer_id FROM orders WHERE id IN
              (SELECT order_id FROM order_product WHERE product_id = ?1))
         ORDER BY id"
    );
    let mut stmt = conn.prepare(&q).map_err(query_error)?;
    let rows = stmt
        .query_map([product_id.get()], Customer::from_row)
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(rows)
}
