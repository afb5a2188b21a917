use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Relational query reference over a small shop schema")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite file to run against instead of the configured store
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the schema, load the seed data and run the query catalogue.
    /// All changes are rolled back afterwards.
    Run {
        /// Catalogue query to run (1-11); repeat for several, default is all
        #[arg(short, long = "query", value_parser = clap::value_parser!(u8).range(1..=11))]
        queries: Vec<u8>,

        /// Customer the per-customer queries look at
        #[arg(long)]
        customer: Option<i64>,

        /// Order whose products query 5 lists
        #[arg(long)]
        order: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the schema DDL
    Schema,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
