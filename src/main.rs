mod cli;

use storefront::{config, render, runner};
use storefront_common::{CustomerId, OrderId};
use storefront_db::catalogue::CatalogueQuery;
use storefront_db::schema;
use storefront_db::store::Store;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "storefront=debug,storefront_db=debug,storefront_common=debug".to_string()
        } else {
            "storefront=info,storefront_db=info".to_string()
        }
    });

    // Logs go to stderr so stdout carries only query output
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            queries,
            customer,
            order,
            json,
        } => run(
            cli.config.as_deref(),
            cli.db,
            &queries,
            customer,
            order,
            json,
        ),
        Commands::Schema => {
            println!("{}", schema::SCHEMA_SQL.trim());
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("storefront {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run(
    config_path: Option<&Path>,
    db: Option<String>,
    queries: &[u8],
    customer: Option<i64>,
    order: Option<i64>,
    json: bool,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Command-line overrides
    if let Some(path) = db {
        config.store.path = path;
    }
    if let Some(id) = customer {
        config.query.customer_id = CustomerId::from(id);
    }
    if let Some(id) = order {
        config.query.order_id = OrderId::from(id);
    }
    config::validate_config(&config)?;

    let queries = queries
        .iter()
        .map(|&n| CatalogueQuery::from_number(n))
        .collect::<storefront_common::Result<Vec<_>>>()?;

    let store = Store::open(&config.store)?;
    let opts = runner::RunOptions {
        params: config.query,
        base_time: config.seed.base_time_or_now(),
        queries,
    };
    let report = runner::run_catalogue(&store, &opts)?;

    if json {
        println!("{}", render::to_json(&report)?);
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        render::write_text(&mut out, &report)?;
        out.flush()?;
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;

    match path {
        Some(p) => println!("Configuration is valid: {}", p.display()),
        None => println!("Configuration is valid (default locations)"),
    }
    println!("  store: {} (pool size {})", config.store.path, config.store.pool_size);
    println!(
        "  query: customer {}, order {}",
        config.query.customer_id, config.query.order_id
    );
    match config.seed.base_time {
        Some(t) => println!("  seed base time: {}", t.to_rfc3339()),
        None => println!("  seed base time: now"),
    }

    Ok(())
}
