//! Batched persistence of discovered cycles.
//!
//! [`BatchWriter`] buffers cycles and writes them in size triggered
//! transactional batches. [`flusher`] runs a writer as the single consumer of
//! the search's output queue, adding the periodic flush and the final drain.
//!
//! A writer is only ever driven through `&mut self`, so at most one flush can
//! be in flight: a trigger that arrives while a flush is running waits for it
//! and then finds the buffer already drained.

pub mod flusher;

use std::sync::Arc;

use derive_more::Display;
use log::{debug, error, info};

use crate::arb::market::Market;
use crate::arb::types::Cycle;
use crate::db_service::PathStore;
use crate::error::StoreError;
use crate::models::arbitrage_path::PathRecord;

/// Lifecycle of a writer within one run
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing received yet
    #[display("idle")]
    Idle,
    /// Buffering cycles between flushes
    #[display("accumulating")]
    Accumulating,
    /// A batch transaction is in flight
    #[display("flushing")]
    Flushing,
    /// The search finished, the remainder is being written
    #[display("draining")]
    Draining,
    /// Drained, or stopped by a storage failure
    #[display("closed")]
    Closed,
}

/// Buffers discovered cycles and commits them in batches
pub struct BatchWriter<S> {
    /// Durable store
    store: S,
    /// Symbol and pool caches used to expand cycles into rows
    market: Arc<Market>,
    /// Paths waiting for the next flush, in discovery order
    buffer: Vec<PathRecord>,
    /// Buffered paths that trigger a flush
    batch_size: usize,
    /// Paths committed so far
    flushed: usize,
    /// Current lifecycle phase
    phase: Phase,
}

impl<S: PathStore> BatchWriter<S> {
    /// Creates a writer flushing every `batch_size` paths (at least one)
    #[must_use]
    pub fn new(store: S, market: Arc<Market>, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            store,
            market,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            flushed: 0,
            phase: Phase::Idle,
        }
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Paths waiting for a flush
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Paths committed so far
    #[must_use]
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    /// Buffers a cycle, flushing when the buffer reaches the batch size.
    ///
    /// # Errors
    /// * If the size triggered flush fails
    pub async fn push(&mut self, cycle: &Cycle) -> Result<(), StoreError> {
        if self.phase == Phase::Idle {
            self.phase = Phase::Accumulating;
        }
        self.buffer.push(self.market.path_record(cycle));
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Writes every buffered path in one transaction and clears the buffer.
    ///
    /// Returns the number of paths written. On failure the batch is rolled back
    /// by the store, the buffer is kept and the writer closes.
    ///
    /// # Errors
    /// * If the store fails to commit the batch
    pub async fn flush(&mut self) -> Result<usize, StoreError> {
        if self.buffer.is_empty() {
            return Ok(0);
        }
        let resume = match self.phase {
            Phase::Draining => Phase::Draining,
            _ => Phase::Accumulating,
        };
        self.phase = Phase::Flushing;

        let ids = match self.store.insert_batch(&self.buffer).await {
            Ok(ids) => ids,
            Err(e) => {
                error!(
                    "persist::flush: Batch of {} paths rolled back: {e}",
                    self.buffer.len()
                );
                self.phase = Phase::Closed;
                return Err(e);
            }
        };

        let written = self.buffer.len();
        self.buffer.clear();
        self.flushed += written;
        self.phase = resume;

        info!(
            "persist::flush: Wrote {written} paths (ids {}..={}), {} total",
            ids.first().copied().unwrap_or_default(),
            ids.last().copied().unwrap_or_default(),
            self.flushed
        );
        Ok(written)
    }

    /// Flushes whatever is left regardless of the batch size and closes the writer.
    ///
    /// Returns the total number of paths committed by this writer.
    ///
    /// # Errors
    /// * If the final flush fails
    pub async fn drain(&mut self) -> Result<usize, StoreError> {
        debug!(
            "persist::drain: Draining {} buffered paths (was {})",
            self.buffer.len(),
            self.phase
        );
        self.phase = Phase::Draining;
        self.flush().await?;
        self.phase = Phase::Closed;
        Ok(self.flushed)
    }
}
