//! Read-only caches built once at the start of a run.
//!
//! The symbol cache turns a cycle into its human readable route and the pool
//! cache resolves the orientation of every step. Neither is written after
//! construction, so the search and the flush task share them through an `Arc`
//! without locking.

use std::collections::HashMap;

use itertools::Itertools;
use log::{error, warn};

use super::types::{normalize_address, Cycle, PoolAddress, TokenAddress};
use crate::models::arbitrage_path::{NewArbitragePath, PathRecord, StepDraft};
use crate::models::pool::Pool;
use crate::models::token::Token;
use crate::utils::constants::SWAP_PATH_SEPARATOR;

/// Token symbols and pools keyed by normalized address
#[derive(Debug, Clone, Default)]
pub struct Market {
    /// Symbol by token address
    symbols: HashMap<TokenAddress, String>,
    /// Pool by pool address
    pools: HashMap<PoolAddress, Pool>,
}

impl Market {
    /// Create the caches from the ingested tokens and pools
    #[must_use]
    pub fn new(tokens: &[Token], pools: &[Pool]) -> Self {
        let symbols = tokens
            .iter()
            .filter_map(|token| {
                token
                    .symbol
                    .as_ref()
                    .map(|symbol| (normalize_address(&token.address), symbol.clone()))
            })
            .collect();

        let mut pool_map = HashMap::with_capacity(pools.len());
        for pool in pools {
            pool_map
                .entry(normalize_address(&pool.address))
                .or_insert_with(|| pool.clone());
        }

        Self {
            symbols,
            pools: pool_map,
        }
    }

    /// Cached symbol of a token
    #[must_use]
    pub fn symbol(&self, token: &str) -> Option<&str> {
        self.symbols.get(&normalize_address(token)).map(String::as_str)
    }

    /// Cached pool by address
    #[must_use]
    pub fn pool(&self, address: &str) -> Option<&Pool> {
        self.pools.get(&normalize_address(address))
    }

    /// Number of cached symbols
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of cached pools
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Human readable route, e.g. `WETH -> USDC -> DAI -> WETH`.
    ///
    /// A token without a cached symbol shows up as its raw address.
    #[must_use]
    pub fn swap_path(&self, cycle: &Cycle) -> String {
        cycle
            .tokens
            .iter()
            .map(|token| {
                self.symbol(token).unwrap_or_else(|| {
                    warn!("market::swap_path: No symbol cached for {token}, using address");
                    token.as_str()
                })
            })
            .join(SWAP_PATH_SEPARATOR)
    }

    /// Step rows of a cycle in traversal order.
    ///
    /// `is_forward` is true when the hop sells the pool's `token0`. A step
    /// whose pool is missing from the cache is skipped; that cannot happen
    /// when the graph was built from the same pools.
    #[must_use]
    pub fn steps(&self, cycle: &Cycle) -> Vec<StepDraft> {
        cycle
            .steps()
            .filter_map(|(index, pool_address, from_token, to_token)| {
                let Some(pool) = self.pool(pool_address) else {
                    error!(
                        "market::steps: Pool {pool_address} of step {index} missing from cache, step skipped ({cycle})"
                    );
                    return None;
                };
                Some(StepDraft {
                    step_index: i32::try_from(index).unwrap_or(i32::MAX),
                    pool_address: pool_address.to_string(),
                    from_token: from_token.to_string(),
                    to_token: to_token.to_string(),
                    is_forward: normalize_address(&pool.token0) == normalize_address(from_token),
                })
            })
            .collect()
    }

    /// Path row plus steps for a discovered cycle
    #[must_use]
    pub fn path_record(&self, cycle: &Cycle) -> PathRecord {
        PathRecord {
            path: NewArbitragePath {
                length: i32::try_from(cycle.len()).unwrap_or(i32::MAX),
                swap_path: self.swap_path(cycle),
            },
            steps: self.steps(cycle),
        }
    }
}
