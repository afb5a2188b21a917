//! Text and JSON rendering of a [`RunReport`].

use std::io::{self, Write};

use crate::runner::RunReport;

/// Printed in place of rows when a query returns nothing.
pub const NO_RECORDS: &str = "No records.";

/// Write each query as a heading followed by one tuple per line.
pub fn write_text<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for result in &report.results {
        writeln!(out, "{}. {}", result.number, result.title)?;
        if result.output.is_empty() {
            writeln!(out, "{NO_RECORDS}")?;
        } else {
            for line in result.output.lines() {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn to_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{run_catalogue, RunOptions};
    use storefront_common::CustomerId;
    use storefront_db::catalogue::{CatalogueQuery, QueryParams};
    use storefront_db::store::{Store, StoreConfig};

    fn report(opts: RunOptions) -> RunReport {
        let store = Store::open(&StoreConfig::default()).unwrap();
        run_catalogue(&store, &opts).unwrap()
    }

    #[test]
    fn text_lists_rows_under_headings() {
        let report = report(RunOptions {
            queries: vec![CatalogueQuery::AllCustomers, CatalogueQuery::CustomerCount],
            ..RunOptions::default()
        });
        let mut buf = Vec::new();
        write_text(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("1. all customers\n(1, john, white, john@email.com)\n"));
        assert!(text.contains("(6, paul, blue, paul@email.com)\n\n7. customer count\n(6)\n"));
    }

    #[test]
    fn empty_result_prints_no_records() {
        let report = report(RunOptions {
            params: QueryParams {
                customer_id: CustomerId::from(6),
                ..QueryParams::default()
            },
            queries: vec![CatalogueQuery::CustomerOrders],
            ..RunOptions::default()
        });
        let mut buf = Vec::new();
        write_text(&mut buf, &report).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "4. orders of customer 6\nNo records.\n\n"
        );
    }

    #[test]
    fn json_carries_seed_and_results() {
        let report = report(RunOptions::default());
        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(value["seed"]["order_products"], 13);
        assert_eq!(value["params"]["customer_id"], 2);
        assert_eq!(value["results"].as_array().unwrap().len(), 11);
        assert_eq!(value["results"][7]["output"]["rows"], 140);
    }
}
