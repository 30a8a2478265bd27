//! In-memory store used by tests.
//!
//! Mirrors the transactional contract of [`PgStore`](super::PgStore): a batch
//! is staged first and only becomes visible when every row of it was written.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{GraphSource, PathStore};
use crate::error::StoreError;
use crate::models::arbitrage_path::{ArbitragePath, ArbitrageStep, PathRecord};
use crate::models::pool::Pool;
use crate::models::token::Token;

#[derive(Default)]
struct State {
    tokens: Vec<Token>,
    pools: Vec<Pool>,
    paths: Vec<ArbitragePath>,
    steps: Vec<ArbitrageStep>,
    next_path_id: i32,
    next_step_id: i32,
    /// Ids of every committed batch, in commit order
    batches: Vec<Vec<i32>>,
    /// Number of `insert_batch` calls, failed ones included
    attempts: usize,
    /// 1-based attempt that fails halfway through
    fail_on_attempt: Option<usize>,
}

/// Shared handle to an in-memory market and path store
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// A store pre-loaded with tokens and pools
    pub fn with_market(tokens: Vec<Token>, pools: Vec<Pool>) -> Self {
        let state = State {
            tokens,
            pools,
            next_path_id: 1,
            next_step_id: 1,
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Makes the `attempt`-th call to `insert_batch` fail after staging part of the batch
    pub fn fail_on_attempt(self, attempt: usize) -> Self {
        if let Ok(mut state) = self.state.try_lock() {
            state.fail_on_attempt = Some(attempt);
        }
        self
    }

    /// Committed paths in id order
    pub async fn paths(&self) -> Vec<ArbitragePath> {
        self.state.lock().await.paths.clone()
    }

    /// Committed steps of a path ordered by `step_index`
    pub async fn steps_of(&self, path_id: i32) -> Vec<ArbitrageStep> {
        let state = self.state.lock().await;
        let mut steps: Vec<_> = state
            .steps
            .iter()
            .filter(|step| step.path_id == path_id)
            .cloned()
            .collect();
        steps.sort_by_key(|step| step.step_index);
        steps
    }

    /// Number of committed steps
    pub async fn step_count(&self) -> usize {
        self.state.lock().await.steps.len()
    }

    /// Path ids of every committed batch
    pub async fn batches(&self) -> Vec<Vec<i32>> {
        self.state.lock().await.batches.clone()
    }

    /// Number of `insert_batch` calls so far
    pub async fn attempts(&self) -> usize {
        self.state.lock().await.attempts
    }
}

#[async_trait]
impl GraphSource for MemoryStore {
    async fn load_tokens(&self) -> Result<Vec<Token>, StoreError> {
        let mut tokens = self.state.lock().await.tokens.clone();
        tokens.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(tokens)
    }

    async fn load_pools(&self) -> Result<Vec<Pool>, StoreError> {
        let mut pools = self.state.lock().await.pools.clone();
        pools.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(pools)
    }
}

#[async_trait]
impl PathStore for MemoryStore {
    async fn insert_batch(&self, batch: &[PathRecord]) -> Result<Vec<i32>, StoreError> {
        let mut state = self.state.lock().await;
        state.attempts += 1;
        let failing = state.fail_on_attempt == Some(state.attempts);

        let mut next_path_id = state.next_path_id;
        let mut next_step_id = state.next_step_id;
        let mut staged_paths = Vec::with_capacity(batch.len());
        let mut staged_steps = Vec::new();

        for record in batch {
            if failing && staged_paths.len() == batch.len().div_ceil(2) {
                return Err(StoreError::Rejected(format!(
                    "simulated failure on attempt {}",
                    state.attempts
                )));
            }

            let path_id = next_path_id;
            next_path_id += 1;
            staged_paths.push(ArbitragePath {
                id: path_id,
                length: record.path.length,
                swap_path: record.path.swap_path.clone(),
            });

            for step in &record.steps {
                let row = step.for_path(path_id);
                staged_steps.push(ArbitrageStep {
                    id: next_step_id,
                    path_id: row.path_id,
                    step_index: row.step_index,
                    pool_address: row.pool_address.to_string(),
                    from_token: row.from_token.to_string(),
                    to_token: row.to_token.to_string(),
                    is_forward: row.is_forward,
                });
                next_step_id += 1;
            }
        }
        if failing {
            return Err(StoreError::Rejected("simulated failure at commit".to_string()));
        }

        let ids: Vec<i32> = staged_paths.iter().map(|path| path.id).collect();
        state.paths.extend(staged_paths);
        state.steps.extend(staged_steps);
        state.next_path_id = next_path_id;
        state.next_step_id = next_step_id;
        state.batches.push(ids.clone());
        Ok(ids)
    }

    async fn clear_paths(&self) -> Result<usize, StoreError> {
        let mut state = self.state.lock().await;
        let removed = state.paths.len();
        state.paths.clear();
        state.steps.clear();
        Ok(removed)
    }

    async fn path_summary(&self) -> Result<Vec<(i32, i64)>, StoreError> {
        let state = self.state.lock().await;
        let mut by_length = BTreeMap::new();
        for path in &state.paths {
            *by_length.entry(path.length).or_insert(0_i64) += 1;
        }
        Ok(by_length.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arb::market::Market;
    use crate::arb::test_helpers::*;

    fn records() -> Vec<PathRecord> {
        let market = Market::new(
            &tokens(&[("WETH", "WETH"), ("A", "A"), ("B", "B")]),
            &pools(&[("P", "WETH", "A"), ("Q", "A", "B"), ("R", "B", "WETH")]),
        );
        vec![
            market.path_record(&cycle(&["weth", "a", "b", "weth"], &["p", "q", "r"])),
            market.path_record(&cycle(&["weth", "b", "a", "weth"], &["r", "q", "p"])),
        ]
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::with_market(Vec::new(), Vec::new());
        let first = store.insert_batch(&records()).await.unwrap();
        let second = store.insert_batch(&records()[..1]).await.unwrap();

        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![3]);
        assert_eq!(store.step_count().await, 9);
        assert_eq!(store.path_summary().await.unwrap(), vec![(3, 3)]);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_nothing_behind() {
        let store = MemoryStore::with_market(Vec::new(), Vec::new()).fail_on_attempt(1);
        assert!(store.insert_batch(&records()).await.is_err());

        assert!(store.paths().await.is_empty());
        assert_eq!(store.step_count().await, 0);
        assert_eq!(store.attempts().await, 1);
    }

    #[tokio::test]
    async fn test_clear_paths() {
        let store = MemoryStore::with_market(Vec::new(), Vec::new());
        store.insert_batch(&records()).await.unwrap();

        assert_eq!(store.clear_paths().await.unwrap(), 2);
        assert!(store.paths().await.is_empty());
        assert_eq!(store.step_count().await, 0);
    }
}
