//! The fixed demonstration dataset.
//!
//! Six customers, seven products, eight orders and thirteen order/product
//! links. Order timestamps are `base + N days` for order N; only their
//! relative order matters.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;
use serde::Serialize;
use storefront_common::{Error, Result};
use tracing::{debug, info};

use crate::models::{Customer, Order, OrderProduct, Product};
use crate::queries::{customers, order_products, orders, products};

/// `(id, name, surname, email)`
pub const CUSTOMERS: [(i64, &str, &str, &str); 6] = [
    (1, "john", "white", "john@email.com"),
    (2, "joe", "black", "joe@email.com"),
    (3, "fillip", "orange", "fillip@email.com"),
    (4, "nata", "purple", "nata@email.com"),
    (5, "will", "brown", "will@email.com"),
    (6, "paul", "blue", "paul@email.com"),
];

/// `(id, name, price)`
pub const PRODUCTS: [(i64, &str, i64); 7] = [
    (1, "apple", 20),
    (2, "orange", 30),
    (3, "mandarin", 40),
    (4, "potato", 50),
    (5, "cucumber", 60),
    (6, "pear", 70),
    (7, "lemon", 80),
];

/// `(id, customer_id, day_offset)`
pub const ORDERS: [(i64, i64, i64); 8] = [
    (1, 1, 1),
    (2, 1, 2),
    (3, 2, 3),
    (4, 5, 4),
    (5, 2, 5),
    (6, 4, 6),
    (7, 3, 7),
    (8, 3, 8),
];

/// `(order_id, product_id)`
pub const ORDER_PRODUCTS: [(i64, i64); 13] = [
    (1, 2),
    (1, 4),
    (1, 6),
    (2, 4),
    (3, 7),
    (3, 1),
    (4, 6),
    (5, 3),
    (6, 1),
    (6, 4),
    (7, 5),
    (7, 6),
    (8, 1),
];

/// Row counts inserted by [`load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedStats {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_products: usize,
}

impl SeedStats {
    pub fn total(&self) -> usize {
        self.customers + self.products + self.orders + self.order_products
    }
}

pub fn customer_rows() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|&(id, name, surname, email)| Customer::new(id, name, surname, email))
        .collect()
}

pub fn product_rows() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|&(id, name, price)| Product::new(id, name, price))
        .collect()
}

/// Seed orders with `init_time = base + day_offset days`.
///
/// Fails with a validation error if an offset runs past the latest
/// representable timestamp.
pub fn order_rows(base: DateTime<Utc>) -> Result<Vec<Order>> {
    ORDERS
        .iter()
        .map(|&(id, customer_id, days)| {
            let init_time = base
                .checked_add_signed(Duration::days(days))
                .ok_or_else(|| {
                    Error::validation(format!("seed base time {base} + {days} days is out of range"))
                })?;
            Ok(Order::new(id, customer_id, init_time))
        })
        .collect()
}

pub fn order_product_rows() -> Vec<OrderProduct> {
    ORDER_PRODUCTS
        .iter()
        .map(|&(order_id, product_id)| OrderProduct::new(order_id, product_id))
        .collect()
}

/// Insert the whole dataset, one batch per table.
///
/// Tables are filled in dependency order (customers, products, orders,
/// order_product). Expects an empty schema; any key collision or dangling
/// reference fails with a constraint error.
pub fn load(conn: &Connection, base: DateTime<Utc>) -> Result<SeedStats> {
    let order_rows = order_rows(base)?;
    let stats = SeedStats {
        customers: customers::insert_customers(conn, &customer_rows())?,
        products: products::insert_products(conn, &product_rows())?,
        orders: orders::insert_orders(conn, &order_rows)?,
        order_products: order_products::insert_order_products(conn, &order_product_rows())?,
    };
    debug!(?stats, "seed batches inserted");
    info!(rows = stats.total(), "seed dataset loaded");
    Ok(stats)
}
