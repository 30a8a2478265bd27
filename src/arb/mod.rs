//! # Arbitrage Module
//!
//! Cycle discovery over the token graph: building the adjacency from pools,
//! resolving the anchor token, enumerating anchored cycles, and turning them
//! into path and step rows.

/// Anchor token resolution
pub mod anchor;
/// Depth bounded cycle search
pub mod finder;
/// Token adjacency
pub mod graph;
/// Symbol and pool caches
pub mod market;
/// Test helpers and utilities
#[cfg(test)]
pub(crate) mod test_helpers;
/// Common type definitions
pub mod types;
