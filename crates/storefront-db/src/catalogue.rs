//! The eleven canonical read queries.
//!
//! Each [`CatalogueQuery`] maps to one function in [`crate::queries`]. The
//! customer and order they look at come from [`QueryParams`]; the defaults
//! (customer 2, order 1) are the ones the reference dataset was built around.

use std::fmt;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use storefront_common::{CustomerId, Error, OrderId, Result};
use tracing::debug;

use crate::models::{Customer, CustomerOrder, CustomerOrderRow, Order, Product};
use crate::queries::{customers, orders, products, reports};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            customer_id: CustomerId::from(2),
            order_id: OrderId::from(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueQuery {
    AllCustomers,
    AllOrders,
    AllProducts,
    CustomerOrders,
    OrderProducts,
    CustomerProducts,
    CustomerCount,
    CustomerSpend,
    CustomersWithOrders,
    CustomersWithOptionalOrders,
    LatestCustomerOrder,
}

impl CatalogueQuery {
    /// All queries in catalogue order.
    pub const ALL: [CatalogueQuery; 11] = [
        CatalogueQuery::AllCustomers,
        CatalogueQuery::AllOrders,
        CatalogueQuery::AllProducts,
        CatalogueQuery::CustomerOrders,
        CatalogueQuery::OrderProducts,
        CatalogueQuery::CustomerProducts,
        CatalogueQuery::CustomerCount,
        CatalogueQuery::CustomerSpend,
        CatalogueQuery::CustomersWithOrders,
        CatalogueQuery::CustomersWithOptionalOrders,
        CatalogueQuery::LatestCustomerOrder,
    ];

    /// Catalogue number, 1 through 11.
    pub fn number(self) -> u8 {
        match self {
            CatalogueQuery::AllCustomers => 1,
            CatalogueQuery::AllOrders => 2,
            CatalogueQuery::AllProducts => 3,
            CatalogueQuery::CustomerOrders => 4,
            CatalogueQuery::OrderProducts => 5,
            CatalogueQuery::CustomerProducts => 6,
            CatalogueQuery::CustomerCount => 7,
            CatalogueQuery::CustomerSpend => 8,
            CatalogueQuery::CustomersWithOrders => 9,
            CatalogueQuery::CustomersWithOptionalOrders => 10,
            CatalogueQuery::LatestCustomerOrder => 11,
        }
    }

    pub fn from_number(n: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.number() == n)
            .ok_or_else(|| Error::validation(format!("no catalogue query numbered {n}")))
    }

    /// Short description, with the parameter values filled in.
    pub fn title(self, params: &QueryParams) -> String {
        let c = params.customer_id;
        match self {
            CatalogueQuery::AllCustomers => "all customers".to_string(),
            CatalogueQuery::AllOrders => "all orders".to_string(),
            CatalogueQuery::AllProducts => "all products".to_string(),
            CatalogueQuery::CustomerOrders => format!("orders of customer {c}"),
            CatalogueQuery::OrderProducts => format!("products of order {}", params.order_id),
            CatalogueQuery::CustomerProducts => format!("products bought by customer {c}"),
            CatalogueQuery::CustomerCount => "customer count".to_string(),
            CatalogueQuery::CustomerSpend => format!("money spent by customer {c}"),
            CatalogueQuery::CustomersWithOrders => "customers with their orders".to_string(),
            CatalogueQuery::CustomersWithOptionalOrders => {
                "customers with their orders, or null".to_string()
            }
            CatalogueQuery::LatestCustomerOrder => format!("latest order of customer {c}"),
        }
    }

    pub fn run(self, conn: &Connection, params: &QueryParams) -> Result<QueryOutput> {
        let output = match self {
            CatalogueQuery::AllCustomers => QueryOutput::Customers(customers::list_customers(conn)?),
            CatalogueQuery::AllOrders => QueryOutput::Orders(orders::list_orders(conn)?),
            CatalogueQuery::AllProducts => QueryOutput::Products(products::list_products(conn)?),
            CatalogueQuery::CustomerOrders => QueryOutput::Orders(
                orders::list_orders_for_customer(conn, params.customer_id)?,
            ),
            CatalogueQuery::OrderProducts => QueryOutput::Products(
                products::list_products_for_order(conn, params.order_id)?,
            ),
            CatalogueQuery::CustomerProducts => QueryOutput::Products(
                products::list_products_for_customer(conn, params.customer_id)?,
            ),
            CatalogueQuery::CustomerCount => QueryOutput::Count(customers::count_customers(conn)?),
            CatalogueQuery::CustomerSpend => QueryOutput::Sum(
                products::total_spent_by_customer(conn, params.customer_id)?,
            ),
            CatalogueQuery::CustomersWithOrders => {
                QueryOutput::CustomerOrders(reports::customers_with_orders(conn)?)
            }
            CatalogueQuery::CustomersWithOptionalOrders => {
                QueryOutput::CustomerOrders(reports::customers_with_optional_orders(conn)?)
            }
            CatalogueQuery::LatestCustomerOrder => QueryOutput::LatestOrders(
                orders::latest_orders_for_customer(conn, params.customer_id)?,
            ),
        };
        debug!(query = self.number(), rows = output.len(), "catalogue query ran");
        Ok(output)
    }
}

impl fmt::Display for CatalogueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Rows returned by a catalogue query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum QueryOutput {
    Customers(Vec<Customer>),
    Orders(Vec<Order>),
    Products(Vec<Product>),
    Count(i64),
    Sum(i64),
    CustomerOrders(Vec<CustomerOrderRow>),
    LatestOrders(Vec<CustomerOrder>),
}

impl QueryOutput {
    /// Number of rows; scalar results count as one row.
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Customers(v) => v.len(),
            QueryOutput::Orders(v) => v.len(),
            QueryOutput::Products(v) => v.len(),
            QueryOutput::Count(_) | QueryOutput::Sum(_) => 1,
            QueryOutput::CustomerOrders(v) => v.len(),
            QueryOutput::LatestOrders(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Each row rendered as a tuple string.
    pub fn lines(&self) -> Vec<String> {
        fn each<T: fmt::Display>(rows: &[T]) -> Vec<String> {
            rows.iter().map(ToString::to_string).collect()
        }

        match self {
            QueryOutput::Customers(v) => each(v),
            QueryOutput::Orders(v) => each(v),
            QueryOutput::Products(v) => each(v),
            QueryOutput::Count(n) | QueryOutput::Sum(n) => vec![format!("({n})")],
            QueryOutput::CustomerOrders(v) => each(v),
            QueryOutput::LatestOrders(v) => each(v),
        }
    }
}

/// Run every catalogue query in order.
pub fn run_all(
    conn: &Connection,
    params: &QueryParams,
) -> Result<Vec<(CatalogueQuery, QueryOutput)>> {
    CatalogueQuery::ALL
        .into_iter()
        .map(|q| q.run(conn, params).map(|out| (q, out)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testing;
    use assert_matches::assert_matches;

    fn run(q: CatalogueQuery) -> QueryOutput {
        let conn = testing::seeded();
        q.run(&conn, &QueryParams::default()).unwrap()
    }

    #[test]
    fn numbers_roundtrip() {
        for (i, q) in CatalogueQuery::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(q.number()), i + 1);
            assert_eq!(CatalogueQuery::from_number(q.number()).unwrap(), q);
        }
        assert_matches!(CatalogueQuery::from_number(0), Err(Error::Validation(_)));
        assert_matches!(CatalogueQuery::from_number(12), Err(Error::Validation(_)));
    }

    #[test]
    fn q1_to_q3_list_everything() {
        assert_eq!(run(CatalogueQuery::AllCustomers).len(), 6);
        assert_eq!(run(CatalogueQuery::AllOrders).len(), 8);
        assert_eq!(run(CatalogueQuery::AllProducts).len(), 7);
    }

    #[test]
    fn q4_orders_of_customer_two() {
        let QueryOutput::Orders(orders) = run(CatalogueQuery::CustomerOrders) else {
            panic!("expected orders");
        };
        let ids: Vec<i64> = orders.iter().map(|o| o.id.get()).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn q5_products_of_order_one() {
        let QueryOutput::Products(products) = run(CatalogueQuery::OrderProducts) else {
            panic!("expected products");
        };
        let ids: Vec<i64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 6]);
    }

    #[test]
    fn q6_products_of_customer_two() {
        let QueryOutput::Products(products) = run(CatalogueQuery::CustomerProducts) else {
            panic!("expected products");
        };
        let ids: Vec<i64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 7]);
    }

    #[test]
    fn q7_and_q8_scalars() {
        assert_eq!(run(CatalogueQuery::CustomerCount), QueryOutput::Count(6));
        assert_eq!(run(CatalogueQuery::CustomerSpend), QueryOutput::Sum(140));
    }

    #[test]
    fn q9_starts_with_john() {
        let QueryOutput::CustomerOrders(rows) = run(CatalogueQuery::CustomersWithOrders) else {
            panic!("expected customer/order rows");
        };
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].customer_id, CustomerId::from(1));
        assert_eq!(rows[0].order_id, Some(OrderId::from(1)));
        assert_eq!(rows[1].order_id, Some(OrderId::from(2)));
        assert!(rows.iter().all(|r| r.order_id.is_some()));
    }

    #[test]
    fn q10_includes_paul_without_order() {
        let QueryOutput::CustomerOrders(rows) = run(CatalogueQuery::CustomersWithOptionalOrders)
        else {
            panic!("expected customer/order rows");
        };
        let paul: Vec<_> = rows
            .iter()
            .filter(|r| r.customer_id == CustomerId::from(6))
            .collect();
        assert_eq!(paul.len(), 1);
        assert_eq!(paul[0].order_id, None);
    }

    #[test]
    fn q11_latest_order_is_five() {
        let QueryOutput::LatestOrders(rows) = run(CatalogueQuery::LatestCustomerOrder) else {
            panic!("expected latest orders");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order.id, OrderId::from(5));
        assert_eq!(rows[0].customer.id, CustomerId::from(2));
    }

    #[test]
    fn params_change_the_subject() {
        let conn = testing::seeded();
        let params = QueryParams {
            customer_id: CustomerId::from(3),
            order_id: OrderId::from(7),
        };
        // fillip: orders 7 {5, 6} and 8 {1}
        assert_eq!(
            CatalogueQuery::CustomerSpend.run(&conn, &params).unwrap(),
            QueryOutput::Sum(20 + 60 + 70)
        );
        assert_eq!(
            CatalogueQuery::OrderProducts.run(&conn, &params).unwrap().len(),
            2
        );
        assert_eq!(
            CatalogueQuery::CustomerProducts.title(&params),
            "products bought by customer 3"
        );
    }

    #[test]
    fn run_all_in_order() {
        let conn = testing::seeded();
        let results = run_all(&conn, &QueryParams::default()).unwrap();
        let numbers: Vec<u8> = results.iter().map(|(q, _)| q.number()).collect();
        assert_eq!(numbers, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn queries_on_missing_schema_fail_as_query_errors() {
        let pool = crate::pool::init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let err = CatalogueQuery::AllCustomers
            .run(&conn, &QueryParams::default())
            .unwrap_err();
        assert_matches!(err, Error::Query(msg) if msg.contains("no such table"));
    }

    #[test]
    fn lines_render_scalars_and_nulls() {
        assert_eq!(QueryOutput::Count(6).lines(), vec!["(6)"]);
        let QueryOutput::CustomerOrders(rows) = run(CatalogueQuery::CustomersWithOptionalOrders)
        else {
            panic!("expected customer/order rows");
        };
        let last = QueryOutput::CustomerOrders(rows).lines().pop().unwrap();
        assert_eq!(last, "(6, paul, blue, NULL)");
    }

    #[test]
    fn output_serializes_with_kind_tag() {
        let json = serde_json::to_value(QueryOutput::Sum(140)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "sum", "rows": 140 }));
    }
}
