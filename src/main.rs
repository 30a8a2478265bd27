use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use eyre::{Error, Result};
use log::{error, info, warn};
use orbit::arb::finder::CancelFlag;
use orbit::config::DiscoveryConfig;
use orbit::core::run_discovery;
use orbit::db_service::{PathStore, PgStore};
use orbit::utils::db_connect::{pool_from_env, run_migrations};
use orbit::utils::logger::setup_logger;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the discovery tables
    Migrate,
    /// Enumerate and store every anchored cycle
    Discover(DiscoverArgs),
    /// Print stored path counts by length as JSON
    Stats,
}

/// Overrides on top of the `ORBIT_*` environment
#[derive(Args, Default)]
struct DiscoverArgs {
    /// Anchor token address
    #[arg(long)]
    anchor_address: Option<String>,
    /// Symbol tried when the address is unknown
    #[arg(long)]
    anchor_symbol: Option<String>,
    /// Shortest cycle, in swaps
    #[arg(long)]
    min_depth: Option<usize>,
    /// Longest cycle, in swaps
    #[arg(long)]
    max_depth: Option<usize>,
    /// Paths per flush
    #[arg(long)]
    batch_size: Option<usize>,
    /// Period of the background flush
    #[arg(long)]
    flush_interval_ms: Option<u64>,
    /// Delete previously stored paths first
    #[arg(long)]
    reset: bool,
}

impl DiscoverArgs {
    fn apply(self, mut config: DiscoveryConfig) -> DiscoveryConfig {
        if let Some(address) = self.anchor_address {
            config.anchor_address = address;
        }
        if let Some(symbol) = self.anchor_symbol {
            config.anchor_symbol = symbol;
        }
        if let Some(min_depth) = self.min_depth {
            config.min_depth = min_depth;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(batch_size) = self.batch_size {
            config.path_batch_size = batch_size;
        }
        if let Some(interval) = self.flush_interval_ms {
            config.flush_interval = Duration::from_millis(interval);
        }
        config
    }
}

async fn discover(store: PgStore, args: DiscoverArgs) -> Result<(), Error> {
    let reset = args.reset;
    let config = args.apply(DiscoveryConfig::from_env()?);
    config.validate()?;

    if reset {
        let removed = store.clear_paths().await?;
        info!("Removed {removed} previously stored paths");
    }

    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, stopping search and flushing");
                on_signal.cancel();
            }
            Err(e) => error!("Failed to listen for interrupt: {e}"),
        }
    });

    let report = run_discovery(&config, &store, store.clone(), cancel).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn print_stats(store: &PgStore) -> Result<(), Error> {
    let summary = store.path_summary().await?;
    let total: i64 = summary.iter().map(|(_, count)| count).sum();
    let by_length: Vec<_> = summary
        .iter()
        .map(|(length, count)| json!({ "length": length, "paths": count }))
        .collect();
    let stats = json!({ "total": total, "by_length": by_length });
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    setup_logger()?;

    let cli = Cli::parse();

    let db = pool_from_env()?;
    match cli.command {
        Some(Commands::Migrate) => {
            run_migrations(&db).await?;
        }
        Some(Commands::Discover(args)) => {
            discover(PgStore::new(db), args).await?;
        }
        Some(Commands::Stats) => {
            print_stats(&PgStore::new(db)).await?;
        }
        None => {
            // Default behavior: bring the schema up and run with env settings
            run_migrations(&db).await?;
            discover(PgStore::new(db), DiscoverArgs::default()).await?;
        }
    }

    Ok(())
}
