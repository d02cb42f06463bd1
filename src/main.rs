//! launchledger main entry point
//!
//! Command-line interface for the incremental past-launch harvester.

use anyhow::Context;
use clap::Parser;
use launchledger::config::{load_config, Config};
use launchledger::crawler::harvest;
use launchledger::dataset::{merge, Dataset};
use launchledger::storage::Store;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// launchledger: incremental past-launch harvester
///
/// Scrapes the past-launches listing into a normalized CSV dataset,
/// resuming from the most recent previously persisted record on each run.
#[derive(Parser, Debug)]
#[command(name = "launchledger")]
#[command(about = "Incremental past-launch harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file; defaults apply when omitted
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).context("failed to load configuration")?
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("launchledger=info,warn"),
            1 => EnvFilter::new("launchledger=debug,info"),
            2 => EnvFilter::new("launchledger=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.storage).context("failed to initialise storage")?;

    println!("=== launchledger dry run ===\n");

    println!("Scraper:");
    println!("  Listing URL: {}", config.scraper.listing_url);
    println!("  Detail URL: {}", config.scraper.detail_url);
    println!("  Max retries: {}", config.scraper.max_retries);
    println!("  Backoff base: {}ms", config.scraper.backoff_base_ms);
    println!("  Page delay: {}ms", config.scraper.page_delay_ms);
    println!("  Date formats: {:?}", config.scraper.date_formats);

    println!("\nStorage:");
    println!("  Backend: {:?}", config.storage.backend);
    println!("  Dataset: {}", store.describe());

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main harvest operation: load, crawl, merge, persist
async fn run(config: Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.storage).context("failed to initialise storage")?;
    tracing::info!("Dataset location: {}", store.describe());

    // A malformed prior dataset is fatal: without its most recent date the
    // crawl cannot know where to stop.
    let existing = match store
        .load()
        .await
        .context("failed to load prior dataset")?
    {
        Some(dataset) => {
            match dataset.most_recent_date() {
                Some(last) => tracing::info!(
                    "Loaded {} existing records; most recent launch date: {}",
                    dataset.len(),
                    last
                ),
                None => tracing::info!(
                    "Loaded {} existing records, none of them dated",
                    dataset.len()
                ),
            }
            dataset
        }
        None => {
            tracing::warn!("No existing dataset found; scraping from scratch");
            Dataset::default()
        }
    };

    let last_known_date = existing.most_recent_date();
    let incoming = harvest(&config.scraper, last_known_date).await?;

    if incoming.is_empty() {
        tracing::info!("No new data");
        return Ok(());
    }

    let new_count = incoming.len();
    let updated = merge(&existing, incoming);
    store
        .save(&updated)
        .await
        .context("failed to save dataset")?;

    tracing::info!(
        "Dataset updated ({} records, {} new)",
        updated.len(),
        new_count
    );
    Ok(())
}
