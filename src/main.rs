use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, io::Write, path::PathBuf};
use trait_query::{BatchOptions, CustomerTable, QueryEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trait-query")]
#[command(about = "Evaluate infix trait queries against a customer file")]
#[command(version)]
struct Cli {
    /// Customer file made of CUSTOMER and TRAIT records
    #[arg(short, long)]
    customers: PathBuf,

    /// Query file with one infix query per line
    #[arg(short, long)]
    queries: PathBuf,

    /// Do not list the customers before running the queries
    #[arg(long)]
    no_customer_listing: bool,

    /// Do not print the postfix form of each query
    #[arg(long)]
    no_postfix: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let customers = fs::read_to_string(&cli.customers)
        .with_context(|| format!("failed to read customer file {}", cli.customers.display()))?;
    let customers: CustomerTable = customers
        .parse()
        .with_context(|| format!("invalid customer file {}", cli.customers.display()))?;
    let queries = fs::read_to_string(&cli.queries)
        .with_context(|| format!("failed to read query file {}", cli.queries.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if !cli.no_customer_listing {
        writeln!(out, "{customers}")?;
    }

    let engine = QueryEngine::new(customers);
    let options = BatchOptions {
        show_postfix: !cli.no_postfix,
    };
    engine
        .run_batch(&queries, &options, &mut out)
        .context("failed to write query results")?;
    Ok(())
}
