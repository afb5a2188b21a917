//! Database query modules.
//!
//! - customers: customer inserts and lookups
//! - products: product inserts, lookups, and purchase aggregates
//! - orders: order inserts, per-customer history, latest order
//! - order_products: the order/product association table
//! - reports: customer/order join projections

pub mod customers;
pub mod order_products;
pub mod orders;
pub mod products;
pub mod reports;
