//! Discovery run orchestration.
//!
//! A run loads the market, resolves the anchor, then runs the cycle search on
//! a blocking thread while a single flush task persists what it finds.

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::arb::anchor::{ensure_connected, resolve_anchor};
use crate::arb::finder::{CancelFlag, CycleFinder};
use crate::arb::graph::TokenGraph;
use crate::arb::market::Market;
use crate::config::DiscoveryConfig;
use crate::db_service::{GraphSource, PathStore};
use crate::error::DiscoveryError;
use crate::persist::flusher::{spawn_flusher, ChannelSink};
use crate::persist::BatchWriter;
use crate::utils::constants::CYCLE_CHANNEL_CAPACITY;

/// Summary of a finished discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Paths committed to the store
    pub paths_found: usize,
    /// Cycles the search handed to the flush task
    pub cycles_emitted: usize,
    /// Whether the run was stopped through its cancel flag
    pub cancelled: bool,
}

/// Enumerates every anchored cycle of the configured length and persists it.
///
/// Cancelling `cancel` stops the search; paths found up to that point are
/// still flushed.
///
/// # Errors
/// * `InvalidConfig` if the configuration is out of range
/// * `AnchorNotFound` / `AnchorDisconnected` before any write is attempted
/// * `StorageFailure` if loading the market or committing a batch fails
/// * `TaskFailed` if the search or flush task panics
pub async fn run_discovery<G, S>(
    config: &DiscoveryConfig,
    source: &G,
    store: S,
    cancel: CancelFlag,
) -> Result<DiscoveryReport, DiscoveryError>
where
    G: GraphSource + ?Sized,
    S: PathStore + 'static,
{
    config.validate()?;
    let start = Instant::now();
    info!("core::run_discovery: Starting with {config:?}");

    let tokens = source.load_tokens().await?;
    let pools = source.load_pools().await?;
    info!(
        "core::run_discovery: Loaded {} tokens and {} pools",
        tokens.len(),
        pools.len()
    );

    let anchor = resolve_anchor(&tokens, &config.anchor_address, &config.anchor_symbol)?;
    let graph = TokenGraph::new(&pools);
    let anchor_index = ensure_connected(&graph, anchor)?;
    info!(
        "core::run_discovery: Graph has {} tokens, {} edges; searching {}..={} swaps from {}",
        graph.token_count(),
        graph.edge_count(),
        config.min_depth,
        config.max_depth,
        anchor.address
    );

    let market = Arc::new(Market::new(&tokens, &pools));
    info!(
        "core::run_discovery: Cached {} symbols and {} pools",
        market.symbol_count(),
        market.pool_count()
    );
    let (tx, rx) = mpsc::channel(CYCLE_CHANNEL_CAPACITY);
    let writer = BatchWriter::new(store, market, config.path_batch_size);
    let flusher = spawn_flusher(writer, rx, config.flush_interval);

    let (min_depth, max_depth) = (config.min_depth, config.max_depth);
    let search_cancel = cancel.clone();
    let search = tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink::new(tx);
        CycleFinder::new(&graph, anchor_index, min_depth, max_depth)
            .with_cancel(search_cancel)
            .run(&mut sink)
    });

    // the flush task ends once the search drops its sender
    let searched = search.await;
    let paths_found = flusher
        .await
        .map_err(|e| DiscoveryError::TaskFailed(e.to_string()))??;
    let outcome = searched.map_err(|e| DiscoveryError::TaskFailed(e.to_string()))?;

    let cancelled = outcome.interrupted && cancel.is_cancelled();
    if cancelled {
        warn!("core::run_discovery: Cancelled after {paths_found} paths");
    }
    info!(
        "core::run_discovery: Stored {paths_found} paths in {:?}",
        start.elapsed()
    );

    Ok(DiscoveryReport {
        paths_found,
        cycles_emitted: outcome.emitted,
        cancelled,
    })
}
