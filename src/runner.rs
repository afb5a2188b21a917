//! One full run: schema, seed data, then the query catalogue, all inside a
//! scratch transaction that is rolled back at the end.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_common::Result;
use storefront_db::catalogue::{CatalogueQuery, QueryOutput, QueryParams};
use storefront_db::seed::{self, SeedStats};
use storefront_db::schema;
use storefront_db::store::Store;
use tracing::info;

/// What to run and with which parameters.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub params: QueryParams,
    pub base_time: DateTime<Utc>,
    /// Queries to run, in order. Empty means the whole catalogue.
    pub queries: Vec<CatalogueQuery>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            params: QueryParams::default(),
            base_time: Utc::now(),
            queries: Vec::new(),
        }
    }
}

impl RunOptions {
    fn selected(&self) -> Vec<CatalogueQuery> {
        if self.queries.is_empty() {
            CatalogueQuery::ALL.to_vec()
        } else {
            self.queries.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub number: u8,
    pub title: String,
    pub output: QueryOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_time: DateTime<Utc>,
    pub params: QueryParams,
    pub seed: SeedStats,
    pub results: Vec<QueryResult>,
}

impl RunReport {
    /// Result of catalogue query `number`, if it was run.
    pub fn result(&self, number: u8) -> Option<&QueryResult> {
        self.results.iter().find(|r| r.number == number)
    }
}

/// Create the schema, load the seed dataset and run the selected queries.
///
/// Everything happens in one transaction on one connection and is rolled
/// back before returning, whether or not a step failed. Running this
/// repeatedly against the same store gives the same results.
pub fn run_catalogue(store: &Store, opts: &RunOptions) -> Result<RunReport> {
    let queries = opts.selected();
    info!(
        store = %store.config().path,
        queries = queries.len(),
        customer = %opts.params.customer_id,
        order = %opts.params.order_id,
        "starting catalogue run"
    );

    let (seed, results) = store.scratch(|conn| {
        schema::create_schema(conn)?;
        let stats = seed::load(conn, opts.base_time)?;

        let results = queries
            .iter()
            .map(|q| -> Result<QueryResult> {
                Ok(QueryResult {
                    number: q.number(),
                    title: q.title(&opts.params),
                    output: q.run(conn, &opts.params)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((stats, results))
    })?;

    info!(results = results.len(), "catalogue run finished, changes rolled back");

    Ok(RunReport {
        base_time: opts.base_time,
        params: opts.params,
        seed,
        results,
    })
}
