//! Storage seams of a discovery run.
//!
//! The run reads tokens and pools through [`GraphSource`] and writes paths
//! through [`PathStore`]. Both take an explicitly passed handle, so tests can
//! swap in [`memory_store::MemoryStore`].

#[cfg(test)]
pub mod memory_store;
mod pg_store;

use async_trait::async_trait;

pub use pg_store::PgStore;

use crate::error::StoreError;
use crate::models::arbitrage_path::PathRecord;
use crate::models::pool::Pool;
use crate::models::token::Token;

/// Read side: the ingested market
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// All tokens, ordered by address
    async fn load_tokens(&self) -> Result<Vec<Token>, StoreError>;

    /// All pools, ordered by address
    async fn load_pools(&self) -> Result<Vec<Pool>, StoreError>;
}

/// Write side: discovered paths
#[async_trait]
pub trait PathStore: Send + Sync {
    /// Writes a batch of paths and their steps in one transaction.
    ///
    /// Returns the assigned path ids in batch order. On error nothing of the
    /// batch is visible.
    async fn insert_batch(&self, batch: &[PathRecord]) -> Result<Vec<i32>, StoreError>;

    /// Deletes every stored path and step, returning the number of paths removed
    async fn clear_paths(&self) -> Result<usize, StoreError>;

    /// Number of stored paths per length, ordered by length
    async fn path_summary(&self) -> Result<Vec<(i32, i64)>, StoreError>;
}
