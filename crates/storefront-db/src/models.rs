//! Rust structs mapping to database tables and join projections.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. The `Display` impls print a row as a tuple, e.g.
//! `(1, john, white, john@email.com)`.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use serde::{Deserialize, Serialize};
use storefront_common::{CustomerId, OrderId, ProductId};

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Render a timestamp for display: RFC 3339, microseconds, `Z` suffix.
pub fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Encode a timestamp the way `orders.init_time` stores it: microseconds
/// since the Unix epoch.
pub fn time_to_micros(t: &DateTime<Utc>) -> i64 {
    t.timestamp_micros()
}

/// Decode an `init_time` column back into a UTC timestamp.
fn parse_time(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(idx)?;
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {micros}us is out of range").into(),
        )
    })
}

fn parse_id<T: From<i64>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    row.get::<_, i64>(idx).map(T::from)
}

fn parse_opt_id<T: From<i64>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<T>> {
    Ok(row.get::<_, Option<i64>>(idx)?.map(T::from))
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl Customer {
    pub fn new(id: i64, name: &str, surname: &str, email: &str) -> Self {
        Self {
            id: CustomerId::from(id),
            name: name.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
        }
    }

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    /// Build from four consecutive columns starting at `start`.
    pub(crate) fn from_row_at(row: &rusqlite::Row, start: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, start)?,
            name: row.get(start + 1)?,
            surname: row.get(start + 2)?,
            email: row.get(start + 3)?,
        })
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.id, self.name, self.surname, self.email
        )
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
}

impl Product {
    pub fn new(id: i64, name: &str, price: i64) -> Self {
        Self {
            id: ProductId::from(id),
            name: name.to_string(),
            price,
        }
    }

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.name, self.price)
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub init_time: DateTime<Utc>,
}

impl Order {
    pub fn new(id: i64, customer_id: i64, init_time: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::from(id),
            customer_id: CustomerId::from(customer_id),
            init_time,
        }
    }

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            customer_id: parse_id(row, 1)?,
            init_time: parse_time(row, 2)?,
        })
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.id,
            self.customer_id,
            format_time(&self.init_time)
        )
    }
}

// ---------------------------------------------------------------------------
// OrderProduct
// ---------------------------------------------------------------------------

/// One row of the order/product association table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderProduct {
    pub order_id: OrderId,
    pub product_id: ProductId,
}

impl OrderProduct {
    pub fn new(order_id: i64, product_id: i64) -> Self {
        Self {
            order_id: OrderId::from(order_id),
            product_id: ProductId::from(product_id),
        }
    }

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            order_id: parse_id(row, 0)?,
            product_id: parse_id(row, 1)?,
        })
    }
}

impl fmt::Display for OrderProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.order_id, self.product_id)
    }
}

// ---------------------------------------------------------------------------
// Join projections
// ---------------------------------------------------------------------------

/// A customer paired with one of its order ids.
///
/// `order_id` is `None` only in left-outer-join results, for customers
/// without orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrderRow {
    pub customer_id: CustomerId,
    pub name: String,
    pub surname: String,
    pub order_id: Option<OrderId>,
}

impl CustomerOrderRow {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            customer_id: parse_id(row, 0)?,
            name: row.get(1)?,
            surname: row.get(2)?,
            order_id: parse_opt_id(row, 3)?,
        })
    }
}

impl fmt::Display for CustomerOrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order_id {
            Some(order_id) => write!(
                f,
                "({}, {}, {}, {})",
                self.customer_id, self.name, self.surname, order_id
            ),
            None => write!(
                f,
                "({}, {}, {}, NULL)",
                self.customer_id, self.name, self.surname
            ),
        }
    }
}

/// An order joined with the customer that placed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order: Order,
    pub customer: Customer,
}

impl CustomerOrder {
    /// Expects the three order columns followed by the four customer columns.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            order: Order::from_row(row)?,
            customer: Customer::from_row_at(row, 3)?,
        })
    }
}

impl fmt::Display for CustomerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {}, {})",
            self.order.id,
            self.order.customer_id,
            format_time(&self.order.init_time),
            self.customer.id,
            self.customer.name,
            self.customer.surname,
            self.customer.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_time_is_fixed_width_utc() {
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_time(&t), "2024-01-02T03:04:05.000000Z");
    }

    #[test]
    fn stored_times_order_past_year_9999() {
        let base = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        let later = base + chrono::Duration::days(1);
        assert!(time_to_micros(&base) < time_to_micros(&later));
        // the display text no longer sorts, the stored value does
        assert!(format_time(&later).starts_with("+10000-"));
    }

    #[test]
    fn display_as_tuples() {
        let c = Customer::new(1, "john", "white", "john@email.com");
        assert_eq!(c.to_string(), "(1, john, white, john@email.com)");

        let p = Product::new(7, "lemon", 80);
        assert_eq!(p.to_string(), "(7, lemon, 80)");

        let op = OrderProduct::new(3, 7);
        assert_eq!(op.to_string(), "(3, 7)");
    }

    #[test]
    fn outer_join_row_prints_null() {
        let row = CustomerOrderRow {
            customer_id: CustomerId::from(6),
            name: "paul".into(),
            surname: "blue".into(),
            order_id: None,
        };
        assert_eq!(row.to_string(), "(6, paul, blue, NULL)");
    }

    #[test]
    fn order_from_row_parses_time() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let order = conn
            .query_row(
                "SELECT 5, 2, ?1",
                [time_to_micros(&t)],
                Order::from_row,
            )
            .unwrap();
        assert_eq!(order, Order::new(5, 2, t));
    }

    #[test]
    fn out_of_range_time_is_conversion_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT 1, 1, ?1", [i64::MAX], Order::from_row)
            .unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, _)
        ));
    }

    #[test]
    fn text_time_is_rejected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT 1, 1, 'yesterday'", [], Order::from_row)
            .unwrap_err();
        assert!(matches!(err, rusqlite::Error::InvalidColumnType(2, _, _)));
    }
}
