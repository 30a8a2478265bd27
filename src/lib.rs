/*!
 * # Orbit - Anchored Arbitrage Path Discovery
 *
 * Orbit enumerates every closed swap route that starts and ends at one anchor
 * token (WETH by default) over the pools ingested into Postgres, and stores
 * each route together with its per-pool steps.
 *
 * ## Core Features
 *
 * - **Cycle Search**: Depth bounded DFS over the token graph, no pool used twice
 * - **Batched Persistence**: Paths are committed in transactional batches,
 *   triggered by size and by a periodic timer
 * - **Cancellation**: A running search can be stopped without losing what it found
 *
 * ## Module Structure
 *
 * - `arb`: Token graph, anchor resolution and cycle search
 * - `config`: Run configuration
 * - `core`: Orchestration of a discovery run
 * - `db_service`: Storage seams and their Postgres implementation
 * - `error`: Error types
 * - `models`: Data models for the application
 * - `persist`: Batch writer and flush task
 * - `schemas`: Database schema definitions
 * - `utils`: Utility functions and helpers
 */

/// Token graph, anchor resolution and cycle search
pub mod arb;
/// Configuration management for the system
pub mod config;
/// Discovery run orchestration
pub mod core;
/// Database interaction for persistent storage
pub mod db_service;
/// Error types
pub mod error;
/// Data models for the application
pub mod models;
/// Batched persistence of discovered paths
pub mod persist;
/// Database schema definitions
pub mod schemas;
/// Utility functions and helpers
pub mod utils;
