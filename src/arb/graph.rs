//! Token adjacency built from the flat list of pools.
//!
//! Every pool contributes two directed edges, `token0 -> token1` and
//! `token1 -> token0`. Tokens and pools are interned into dense indices so the
//! search can track used pools with a plain `Vec<bool>` instead of hashing
//! addresses on every step.

use std::collections::HashMap;

use log::warn;

use super::types::{normalize_address, PoolAddress, TokenAddress};
use crate::models::pool::Pool;

/// Dense index of a token inside a [`TokenGraph`]
pub type TokenIndex = usize;

/// Dense index of a pool inside a [`TokenGraph`]
pub type PoolIndex = usize;

/// A directed edge: leave the current token through `pool`, arrive at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Pool used for the hop
    pub pool: PoolIndex,
    /// Destination token
    pub to: TokenIndex,
}

/// Adjacency list of tokens (vertices) to outgoing edges.
///
/// Edge order follows pool input order, which keeps the search output
/// reproducible for identical input.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    /// Tokens indexed by `TokenIndex`
    token_vec: Vec<TokenAddress>,
    /// Address to `TokenIndex`
    token_map: HashMap<TokenAddress, TokenIndex>,
    /// Pools indexed by `PoolIndex`
    pool_vec: Vec<PoolAddress>,
    /// Outgoing edges indexed by `TokenIndex`
    adjacency: Vec<Vec<Edge>>,
}

impl TokenGraph {
    /// Builds the adjacency from every ingested pool.
    ///
    /// A pool address seen twice is a contract violation of the ingester; the
    /// repeat is ignored so that each edge keeps mapping to exactly one pool.
    #[must_use]
    pub fn new(pools: &[Pool]) -> Self {
        let mut graph = Self {
            token_vec: Vec::new(),
            token_map: HashMap::new(),
            pool_vec: Vec::with_capacity(pools.len()),
            adjacency: Vec::new(),
        };
        let mut seen_pools = HashMap::with_capacity(pools.len());

        for pool in pools {
            let pool_address = normalize_address(&pool.address);
            if seen_pools.contains_key(&pool_address) {
                warn!("graph::new: Duplicate pool {pool_address} ignored");
                continue;
            }
            let pool_index = graph.pool_vec.len();
            graph.pool_vec.push(pool_address.clone());
            seen_pools.insert(pool_address, pool_index);

            let token0 = graph.intern(&pool.token0);
            let token1 = graph.intern(&pool.token1);

            graph.adjacency[token0].push(Edge {
                pool: pool_index,
                to: token1,
            });
            graph.adjacency[token1].push(Edge {
                pool: pool_index,
                to: token0,
            });
        }

        graph
    }

    fn intern(&mut self, address: &str) -> TokenIndex {
        let address = normalize_address(address);
        if let Some(&index) = self.token_map.get(&address) {
            return index;
        }
        let index = self.token_vec.len();
        self.token_vec.push(address.clone());
        self.token_map.insert(address, index);
        self.adjacency.push(Vec::new());
        index
    }

    /// Index of a token, if any pool references it
    #[must_use]
    pub fn token_index(&self, address: &str) -> Option<TokenIndex> {
        self.token_map.get(&normalize_address(address)).copied()
    }

    /// Address of the token at `index`
    #[must_use]
    pub fn token(&self, index: TokenIndex) -> &str {
        &self.token_vec[index]
    }

    /// Address of the pool at `index`
    #[must_use]
    pub fn pool(&self, index: PoolIndex) -> &str {
        &self.pool_vec[index]
    }

    /// Outgoing edges of the token at `index`
    #[must_use]
    pub fn edges(&self, index: TokenIndex) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Outgoing `(pool, destination)` pairs of a token, empty for unknown tokens
    pub fn neighbours<'a>(&'a self, address: &str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.token_index(address)
            .map(|index| self.adjacency[index].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|edge| (self.pool(edge.pool), self.token(edge.to)))
    }

    /// Number of distinct tokens referenced by any pool
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_vec.len()
    }

    /// Number of distinct pools in the graph
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pool_vec.len()
    }

    /// Total number of directed edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}
